use sqlx::SqlitePool;

use crate::database::models::teacher::{NewTeacher, TeacherEntity};

/// 教师数据库操作
pub struct TeacherOperation;

impl TeacherOperation {
    pub async fn create(pool: &SqlitePool, teacher: &NewTeacher) -> Result<TeacherEntity, sqlx::Error> {
        sqlx::query_as::<_, TeacherEntity>(
            r#"
            INSERT INTO teachers (name, subject, grade_id)
            VALUES (?, ?, ?)
            RETURNING id, name, subject, grade_id
            "#,
        )
        .bind(&teacher.name)
        .bind(&teacher.subject)
        .bind(teacher.grade_id)
        .fetch_one(pool)
        .await
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<TeacherEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeacherEntity>(
            "SELECT id, name, subject, grade_id FROM teachers ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}
