mod handler;
mod model;

pub use handler::{index, login, login_form, logout};
