use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Stopwatch;
use crate::errors::AppResult;
use crate::store::open_store;
use crate::ui::panel;

/// Handle the `list` command: one mount of the stopwatch, then print.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { json } = cmd {
        let mut stopwatch = Stopwatch::new(open_store(cfg)?);
        stopwatch.mount().await;
        let records = &stopwatch.state().saved_times;

        if *json {
            println!("{}", serde_json::to_string_pretty(records)?);
        } else {
            print!("{}", panel::render_saved_times(stopwatch.state()));
        }
    }
    Ok(())
}
