pub mod saved_time;

pub use saved_time::{NewSavedTime, SavedTimeRecord};
