pub mod cache;
pub mod demo;
pub mod school;
pub mod user;
