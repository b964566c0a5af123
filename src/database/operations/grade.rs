use sqlx::SqlitePool;

use crate::database::models::grade::{GradeEntity, GradeRoster};
use crate::database::operations::{StudentOperation, TeacherOperation};

/// 班级数据库操作
pub struct GradeOperation;

impl GradeOperation {
    pub async fn create(pool: &SqlitePool, name: &str) -> Result<GradeEntity, sqlx::Error> {
        sqlx::query_as::<_, GradeEntity>(
            r#"
            INSERT INTO grades (name)
            VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<GradeEntity>, sqlx::Error> {
        sqlx::query_as::<_, GradeEntity>("SELECT id, name FROM grades ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// 按班级汇总学生和教师
    pub async fn roster(pool: &SqlitePool) -> Result<Vec<GradeRoster>, sqlx::Error> {
        let grades = Self::list(pool).await?;
        let students = StudentOperation::list(pool).await?;
        let teachers = TeacherOperation::list(pool).await?;

        let roster = grades
            .into_iter()
            .map(|grade| GradeRoster {
                students: students
                    .iter()
                    .filter(|s| s.grade_id == grade.id)
                    .cloned()
                    .collect(),
                teachers: teachers
                    .iter()
                    .filter(|t| t.grade_id == grade.id)
                    .cloned()
                    .collect(),
                grade,
            })
            .collect();

        Ok(roster)
    }
}
