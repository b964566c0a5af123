// 数据库实体定义

pub mod grade;
pub mod student;
pub mod teacher;
pub mod user;

pub use grade::{GradeEntity, GradeRoster};
pub use student::{NewStudent, StudentEntity};
pub use teacher::{NewTeacher, TeacherEntity};
pub use user::UserEntity;
