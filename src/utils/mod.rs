pub mod path;
pub mod time;

pub use time::{format_created_at, format_time};
