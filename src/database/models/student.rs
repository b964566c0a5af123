use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 学生实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudentEntity {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub grade_id: i64,
}

/// 待插入的学生记录，字段已校验
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub grade_id: i64,
}
