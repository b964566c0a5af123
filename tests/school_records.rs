mod common;

use axum::http::StatusCode;
use common::{assert_redirect, body_text, session_cookie, spawn_app};
use schoolhouse::database::GradeOperation;

#[tokio::test]
async fn student_appears_under_grade_on_dashboard() {
    let app = spawn_app().await;

    let response = app
        .post_form("/register", "username=bob&password=pw1", None)
        .await;
    assert_redirect(&response, "/dashboard");

    let response = app
        .post_form("/login", "username=bob&password=pw1", None)
        .await;
    assert_redirect(&response, "/dashboard");
    let cookie = session_cookie(&response).unwrap();

    let response = app.post_form("/add_grade", "name=10A", Some(&cookie)).await;
    assert_redirect(&response, "/dashboard");

    let grades = GradeOperation::list(&app.state.pool).await.unwrap();
    assert_eq!(grades.len(), 1);
    let grade_id = grades[0].id;

    let form = format!("name=Carol&age=16&grade={}", grade_id);
    let response = app.post_form("/add_student", &form, Some(&cookie)).await;
    assert_redirect(&response, "/dashboard");

    let form = format!("name=Mr.+Smith&subject=Math&grade={}", grade_id);
    let response = app.post_form("/add_teacher", &form, Some(&cookie)).await;
    assert_redirect(&response, "/dashboard");

    let roster = GradeOperation::roster(&app.state.pool).await.unwrap();
    assert_eq!(roster[0].grade.name, "10A");
    assert_eq!(roster[0].students[0].name, "Carol");
    assert_eq!(roster[0].students[0].age, 16);
    assert_eq!(roster[0].teachers[0].name, "Mr. Smith");

    let response = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    let section = page
        .split("<section")
        .find(|s| s.contains("<h2>10A</h2>"))
        .expect("grade section");
    assert!(section.contains("Carol (16)"));
    assert!(section.contains("Mr. Smith (Math)"));
}

#[tokio::test]
async fn add_forms_list_existing_grades() {
    let app = spawn_app().await;
    let response = app
        .post_form("/register", "username=bob&password=pw1", None)
        .await;
    let cookie = session_cookie(&response).unwrap();
    app.post_form("/add_grade", "name=9B", Some(&cookie)).await;

    for path in ["/add_student", "/add_teacher"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(">9B</option>"));
    }
}

#[tokio::test]
async fn student_with_unknown_grade_is_rejected() {
    let app = spawn_app().await;
    let response = app
        .post_form("/register", "username=bob&password=pw1", None)
        .await;
    let cookie = session_cookie(&response).unwrap();

    let response = app
        .post_form("/add_student", "name=Ghost&age=10&grade=99", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_text(response)
            .await
            .contains("Selected grade does not exist.")
    );
}

#[tokio::test]
async fn invalid_grade_name_rerenders_form() {
    let app = spawn_app().await;
    let response = app
        .post_form("/register", "username=bob&password=pw1", None)
        .await;
    let cookie = session_cookie(&response).unwrap();

    let response = app.post_form("/add_grade", "name=", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Grade name is required."));
    assert!(GradeOperation::list(&app.state.pool).await.unwrap().is_empty());
}
