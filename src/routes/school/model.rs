use serde::Deserialize;

use crate::database::models::{NewStudent, NewTeacher};
use crate::error::AppError;

const MAX_GRADE_NAME_LEN: usize = 10;
const MAX_NAME_LEN: usize = 150;
const MAX_SUBJECT_LEN: usize = 100;

/// 表单字段都按字符串接收，校验失败时重新渲染表单而不是返回 422
#[derive(Debug, Deserialize)]
pub struct GradeForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub grade: String,
}

#[derive(Debug, Deserialize)]
pub struct TeacherForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
}

fn required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required.", field)));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters.",
            field, max_len
        )));
    }
    Ok(value.to_string())
}

fn grade_id(value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::validation("Please select a grade."))
}

impl GradeForm {
    pub fn validate(&self) -> Result<String, AppError> {
        required_text(&self.name, "Grade name", MAX_GRADE_NAME_LEN)
    }
}

impl StudentForm {
    pub fn validate(&self) -> Result<NewStudent, AppError> {
        let name = required_text(&self.name, "Name", MAX_NAME_LEN)?;
        let age = self
            .age
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|age| *age >= 0)
            .ok_or_else(|| AppError::validation("Age must be a non-negative whole number."))?;
        Ok(NewStudent {
            name,
            age,
            grade_id: grade_id(&self.grade)?,
        })
    }
}

impl TeacherForm {
    pub fn validate(&self) -> Result<NewTeacher, AppError> {
        Ok(NewTeacher {
            name: required_text(&self.name, "Name", MAX_NAME_LEN)?,
            subject: required_text(&self.subject, "Subject", MAX_SUBJECT_LEN)?,
            grade_id: grade_id(&self.grade)?,
        })
    }
}

/// 外键约束失败说明所选班级不存在
pub fn map_grade_reference(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::validation("Selected grade does not exist.")
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_form_parses_fields() {
        let form = StudentForm {
            name: " Carol ".into(),
            age: "16".into(),
            grade: "1".into(),
        };
        let student = form.validate().unwrap();
        assert_eq!(student.name, "Carol");
        assert_eq!(student.age, 16);
        assert_eq!(student.grade_id, 1);
    }

    #[test]
    fn student_form_rejects_bad_age() {
        for age in ["", "sixteen", "-1"] {
            let form = StudentForm {
                name: "Carol".into(),
                age: age.into(),
                grade: "1".into(),
            };
            assert!(matches!(form.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn grade_name_length_is_limited() {
        let ok = GradeForm { name: "10A".into() };
        assert_eq!(ok.validate().unwrap(), "10A");
        let long = GradeForm {
            name: "a very long grade".into(),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn teacher_form_requires_grade() {
        let form = TeacherForm {
            name: "Mr. Smith".into(),
            subject: "Math".into(),
            grade: String::new(),
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }
}
