pub mod stopwatch;
pub mod ticker;

pub use stopwatch::{SaveOutcome, Stopwatch, StopwatchState};
pub use ticker::Ticker;
