mod handler;
mod model;

pub use handler::{
    add_grade, add_grade_form, add_student, add_student_form, add_teacher, add_teacher_form,
    dashboard,
};
