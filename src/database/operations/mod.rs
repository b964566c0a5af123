// 数据库操作实现

pub mod grade;
pub mod student;
pub mod teacher;
pub mod user;

pub use grade::GradeOperation;
pub use student::StudentOperation;
pub use teacher::TeacherOperation;
pub use user::UserOperation;
