mod handler;

pub use handler::{clear_cache, expensive_query};
