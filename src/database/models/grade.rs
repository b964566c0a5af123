use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{StudentEntity, TeacherEntity};

/// 班级实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GradeEntity {
    pub id: i64,
    pub name: String,
}

/// 班级及其学生、老师，用于总览页
#[derive(Debug, Clone, Serialize)]
pub struct GradeRoster {
    pub grade: GradeEntity,
    pub students: Vec<StudentEntity>,
    pub teachers: Vec<TeacherEntity>,
}
