//! Stopwatch controller: local timer state plus the bridge to the record store.
//!
//! All state lives in one [`StopwatchState`] owned by [`Stopwatch`]. The
//! controller is driven from a single event loop; every operation takes
//! `&mut self`, so store calls never overlap and the last one to finish is
//! the one whose list is displayed.

use super::ticker::Ticker;
use crate::models::{NewSavedTime, SavedTimeRecord};
use crate::store::RecordStore;
use crate::utils::time::format_time;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwatchState {
    pub elapsed_seconds: u64,
    pub is_running: bool,
    pub is_loading: bool,
    /// Newest first, exactly as the store returned them.
    pub saved_times: Vec<SavedTimeRecord>,
}

/// Result of [`Stopwatch::save_and_reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Row stored, elapsed time reset and list refreshed.
    Saved { record: SavedTimeRecord },
    /// The store refused the insert; elapsed time is kept for a retry.
    Failed { time_record: String, message: String },
    /// Nothing has been timed yet; no insert was attempted.
    NothingToSave,
}

pub struct Stopwatch {
    state: StopwatchState,
    store: Box<dyn RecordStore>,
    ticker: Ticker,
}

impl Stopwatch {
    /// A stopped stopwatch at zero with an empty list.
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self::with_ticker(store, Ticker::every_second())
    }

    /// Drive the count from a custom ticker; every tick counts as one second.
    pub fn with_ticker(store: Box<dyn RecordStore>, ticker: Ticker) -> Self {
        Self {
            state: StopwatchState::default(),
            store,
            ticker,
        }
    }

    pub fn state(&self) -> &StopwatchState {
        &self.state
    }

    pub fn formatted_elapsed(&self) -> String {
        format_time(self.state.elapsed_seconds)
    }

    /// First load of the record list.
    pub async fn mount(&mut self) {
        debug!(backend = self.store.name(), "mounting stopwatch");
        self.load_records().await;
    }

    /// Release the tick. The stopwatch must not be driven afterwards.
    pub fn teardown(&mut self) {
        self.state.is_running = false;
        self.ticker.disarm();
        debug!("stopwatch torn down");
    }

    pub fn start(&mut self) {
        if self.state.is_running {
            return;
        }
        self.state.is_running = true;
        self.ticker.arm();
        debug!(elapsed = self.state.elapsed_seconds, "timer started");
    }

    pub fn stop(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        self.ticker.disarm();
        debug!(elapsed = self.state.elapsed_seconds, "timer stopped");
    }

    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Wait for the next one-second tick and count it.
    ///
    /// Never completes while stopped. Dropping the future before it
    /// completes loses nothing: the tick is still pending on the interval.
    pub async fn tick(&mut self) {
        self.ticker.tick().await;
        if self.state.is_running {
            self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        }
    }

    /// Mark the list as being fetched. `load_records` does this itself; call
    /// it first when the loading state has to be shown before the fetch.
    pub fn begin_load(&mut self) {
        self.state.is_loading = true;
    }

    /// Replace the list with every stored row, newest first.
    ///
    /// Failures are logged and leave the current list untouched.
    pub async fn load_records(&mut self) {
        self.begin_load();

        match self.store.select_newest_first().await {
            Ok(rows) => {
                debug!(count = rows.len(), "saved times loaded");
                self.state.saved_times = rows;
            }
            Err(e) => {
                error!(backend = self.store.name(), error = %e, "Error fetching times");
            }
        }

        self.state.is_loading = false;
    }

    /// First step of a save: stop the timer, enter the loading state and
    /// return the formatted time to persist.
    ///
    /// Returns `None` and changes nothing when no time has elapsed.
    pub fn begin_save(&mut self) -> Option<String> {
        if self.state.elapsed_seconds == 0 {
            return None;
        }

        self.stop();
        self.state.is_loading = true;
        Some(self.formatted_elapsed())
    }

    /// Second step of a save: insert the row.
    ///
    /// On success elapsed time goes back to zero and the loading state is
    /// kept for the refetch (`load_records`). On failure elapsed time is
    /// kept and the loading state is cleared.
    pub async fn commit_save(&mut self, time_record: String) -> SaveOutcome {
        match self.store.insert(&NewSavedTime::new(&time_record)).await {
            Err(e) => {
                warn!(
                    backend = self.store.name(),
                    %time_record,
                    error = %e,
                    "saving time failed"
                );
                self.state.is_loading = false;
                SaveOutcome::Failed {
                    time_record,
                    message: e.to_string(),
                }
            }
            Ok(record) => {
                info!(id = record.id, %time_record, "time saved");
                self.state.elapsed_seconds = 0;
                SaveOutcome::Saved { record }
            }
        }
    }

    /// Persist the current elapsed time and start over.
    ///
    /// With zero elapsed seconds this is a no-op. Otherwise the timer is
    /// stopped first; on success elapsed time goes back to zero and the list
    /// is fetched again, on failure both are left as they were.
    pub async fn save_and_reset(&mut self) -> SaveOutcome {
        let Some(time_record) = self.begin_save() else {
            return SaveOutcome::NothingToSave;
        };

        let outcome = self.commit_save(time_record).await;
        if matches!(outcome, SaveOutcome::Saved { .. }) {
            self.load_records().await;
        }
        outcome
    }
}
