// 页面渲染
// 只输出最简单的 HTML，所有动态内容都经过转义

use axum::response::Html;

use crate::database::{GradeEntity, GradeRoster};
use crate::utils::escape_html;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body,
    ))
}

fn flash(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"flash\">{}</p>\n", escape_html(m)))
        .unwrap_or_default()
}

fn grade_options(grades: &[GradeEntity]) -> String {
    grades
        .iter()
        .map(|g| format!("<option value=\"{}\">{}</option>", g.id, escape_html(&g.name)))
        .collect::<Vec<_>>()
        .join("")
}

pub fn index(username: Option<&str>) -> Html<String> {
    let status = match username {
        Some(name) => format!(
            "<p>Logged in as {}</p>\n<p><a href=\"/dashboard\">Dashboard</a> | <a href=\"/logout\">Log out</a></p>",
            escape_html(name)
        ),
        None => "<p><a href=\"/login\">Log in</a> | <a href=\"/register\">Register</a></p>".to_string(),
    };
    layout("School", &status)
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <p><input type=\"text\" name=\"username\" placeholder=\"Username\"></p>\n\
         <p><input type=\"password\" name=\"password\" placeholder=\"Password\"></p>\n\
         <p><input type=\"submit\" value=\"{submit}\"></p>\n\
         </form>"
    )
}

pub fn login_page(message: Option<&str>) -> Html<String> {
    let body = format!(
        "{}{}\n<p><a href=\"/register\">Register</a></p>",
        flash(message),
        credentials_form("/login", "Log in")
    );
    layout("Log in", &body)
}

pub fn register_page(message: Option<&str>) -> Html<String> {
    let body = format!(
        "{}{}\n<p><a href=\"/login\">Log in</a></p>",
        flash(message),
        credentials_form("/register", "Register")
    );
    layout("Register", &body)
}

pub fn dashboard(username: &str, roster: &[GradeRoster]) -> Html<String> {
    let mut body = format!(
        "<p>Logged in as {}</p>\n<p><a href=\"/add_grade\">Add grade</a> | <a href=\"/add_student\">Add student</a> | <a href=\"/add_teacher\">Add teacher</a> | <a href=\"/logout\">Log out</a></p>\n",
        escape_html(username)
    );

    if roster.is_empty() {
        body.push_str("<p>No grades yet.</p>\n");
    }

    for entry in roster {
        body.push_str(&format!(
            "<section class=\"grade\" id=\"grade-{}\">\n<h2>{}</h2>\n",
            entry.grade.id,
            escape_html(&entry.grade.name)
        ));

        body.push_str("<h3>Students</h3>\n<ul>\n");
        for student in &entry.students {
            body.push_str(&format!(
                "<li>{} ({})</li>\n",
                escape_html(&student.name),
                student.age
            ));
        }
        body.push_str("</ul>\n<h3>Teachers</h3>\n<ul>\n");
        for teacher in &entry.teachers {
            body.push_str(&format!(
                "<li>{} ({})</li>\n",
                escape_html(&teacher.name),
                escape_html(&teacher.subject)
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    layout("Dashboard", &body)
}

pub fn add_grade_page(message: Option<&str>) -> Html<String> {
    let body = format!(
        "{}<form method=\"post\" action=\"/add_grade\">\n\
         <p><input type=\"text\" name=\"name\" placeholder=\"Grade name\"></p>\n\
         <p><input type=\"submit\" value=\"Add grade\"></p>\n\
         </form>",
        flash(message)
    );
    layout("Add grade", &body)
}

pub fn add_student_page(grades: &[GradeEntity], message: Option<&str>) -> Html<String> {
    let body = format!(
        "{}<form method=\"post\" action=\"/add_student\">\n\
         <p><input type=\"text\" name=\"name\" placeholder=\"Name\"></p>\n\
         <p><input type=\"number\" name=\"age\" placeholder=\"Age\"></p>\n\
         <p><select name=\"grade\">{}</select></p>\n\
         <p><input type=\"submit\" value=\"Add student\"></p>\n\
         </form>",
        flash(message),
        grade_options(grades)
    );
    layout("Add student", &body)
}

pub fn add_teacher_page(grades: &[GradeEntity], message: Option<&str>) -> Html<String> {
    let body = format!(
        "{}<form method=\"post\" action=\"/add_teacher\">\n\
         <p><input type=\"text\" name=\"name\" placeholder=\"Name\"></p>\n\
         <p><input type=\"text\" name=\"subject\" placeholder=\"Subject\"></p>\n\
         <p><select name=\"grade\">{}</select></p>\n\
         <p><input type=\"submit\" value=\"Add teacher\"></p>\n\
         </form>",
        flash(message),
        grade_options(grades)
    );
    layout("Add teacher", &body)
}

pub fn demo_login_page(message: Option<&str>) -> Html<String> {
    let body = format!(
        "{}<form method=\"post\" action=\"/demo/login\">\n\
         <p><input type=\"text\" name=\"username\"></p>\n\
         <p><input type=\"submit\" value=\"Login\"></p>\n\
         </form>",
        flash(message)
    );
    layout("Login", &body)
}
