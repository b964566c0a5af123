use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 教师实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TeacherEntity {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub grade_id: i64,
}

/// 待插入的教师记录，字段已校验
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub subject: String,
    pub grade_id: i64,
}
