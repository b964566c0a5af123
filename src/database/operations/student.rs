use sqlx::SqlitePool;

use crate::database::models::student::{NewStudent, StudentEntity};

/// 学生数据库操作
pub struct StudentOperation;

impl StudentOperation {
    /// 插入学生，班级不存在时由外键约束拒绝
    pub async fn create(pool: &SqlitePool, student: &NewStudent) -> Result<StudentEntity, sqlx::Error> {
        sqlx::query_as::<_, StudentEntity>(
            r#"
            INSERT INTO students (name, age, grade_id)
            VALUES (?, ?, ?)
            RETURNING id, name, age, grade_id
            "#,
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(student.grade_id)
        .fetch_one(pool)
        .await
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<StudentEntity>, sqlx::Error> {
        sqlx::query_as::<_, StudentEntity>(
            "SELECT id, name, age, grade_id FROM students ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}
