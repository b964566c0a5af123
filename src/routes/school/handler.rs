use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    cache::CachedSession,
    database::{GradeOperation, StudentOperation, TeacherOperation},
    error::AppError,
    views,
};

use super::model::{GradeForm, StudentForm, TeacherForm, map_grade_reference};

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<CachedSession>,
) -> Result<Html<String>, AppError> {
    let roster = GradeOperation::roster(&state.pool).await?;
    Ok(views::dashboard(session.identity.username(), &roster))
}

pub async fn add_grade_form() -> Html<String> {
    views::add_grade_page(None)
}

pub async fn add_grade(
    State(state): State<AppState>,
    Form(req): Form<GradeForm>,
) -> Result<Response, AppError> {
    let name = match req.validate() {
        Ok(name) => name,
        Err(e) => return Ok((e.status_code(), views::add_grade_page(Some(&e.to_string()))).into_response()),
    };

    let grade = GradeOperation::create(&state.pool, &name).await?;
    tracing::info!("grade created: {} ({})", grade.name, grade.id);
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn add_student_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let grades = GradeOperation::list(&state.pool).await?;
    Ok(views::add_student_page(&grades, None))
}

pub async fn add_student(
    State(state): State<AppState>,
    Form(req): Form<StudentForm>,
) -> Result<Response, AppError> {
    let result = match req.validate() {
        Ok(student) => StudentOperation::create(&state.pool, &student)
            .await
            .map_err(map_grade_reference),
        Err(e) => Err(e),
    };

    match result {
        Ok(student) => {
            tracing::info!("student created: {} ({})", student.name, student.id);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) if e.is_user_facing() => {
            let grades = GradeOperation::list(&state.pool).await?;
            Ok((e.status_code(), views::add_student_page(&grades, Some(&e.to_string()))).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn add_teacher_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let grades = GradeOperation::list(&state.pool).await?;
    Ok(views::add_teacher_page(&grades, None))
}

pub async fn add_teacher(
    State(state): State<AppState>,
    Form(req): Form<TeacherForm>,
) -> Result<Response, AppError> {
    let result = match req.validate() {
        Ok(teacher) => TeacherOperation::create(&state.pool, &teacher)
            .await
            .map_err(map_grade_reference),
        Err(e) => Err(e),
    };

    match result {
        Ok(teacher) => {
            tracing::info!("teacher created: {} ({})", teacher.name, teacher.id);
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(e) if e.is_user_facing() => {
            let grades = GradeOperation::list(&state.pool).await?;
            Ok((e.status_code(), views::add_teacher_page(&grades, Some(&e.to_string()))).into_response())
        }
        Err(e) => Err(e),
    }
}
