use crate::config::Config;
use crate::core::{SaveOutcome, Stopwatch};
use crate::errors::AppResult;
use crate::store::open_store;
use crate::ui::messages::{alert, info, warning};
use crate::ui::panel;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Toggle,
    Save,
    Reload,
    Panel,
    Help,
    Quit,
    Unknown,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" | "s" | "start" | "stop" => Input::Toggle,
            "v" | "save" => Input::Save,
            "r" | "reload" => Input::Reload,
            "l" | "list" | "p" | "panel" => Input::Panel,
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            _ => Input::Unknown,
        }
    }
}

/// Handle the `run` command: the interactive stopwatch.
///
/// A single loop multiplexes the one-second tick and stdin. Store calls are
/// awaited inline, so the next command is read only once the previous one
/// has finished.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut stopwatch = Stopwatch::new(open_store(cfg)?);
    stopwatch.mount().await;

    print!("{}", panel::render(stopwatch.state()));
    println!("\n{}", panel::help());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = stopwatch.tick() => {
                print!("{}", panel::readout_line(stopwatch.state()));
                stdout.flush()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match Input::parse(&line) {
                    Input::Toggle => {
                        stopwatch.toggle();
                        print!("{}", panel::readout_line(stopwatch.state()));
                        stdout.flush()?;
                    }
                    Input::Save => save(&mut stopwatch).await?,
                    Input::Reload => {
                        stopwatch.begin_load();
                        print!("\n{}", panel::render_saved_times(stopwatch.state()));
                        stdout.flush()?;
                        stopwatch.load_records().await;
                        print!("{}", panel::render_saved_times(stopwatch.state()));
                    }
                    Input::Panel => print!("{}", panel::render(stopwatch.state())),
                    Input::Help => println!("\n{}", panel::help()),
                    Input::Quit => break,
                    Input::Unknown => {
                        warning(format!("Unknown command '{}' (h for help)", line.trim()))
                    }
                }
            }
        }
    }

    stopwatch.teardown();
    println!();
    info(format!("Stopped at {}", stopwatch.formatted_elapsed()));
    Ok(())
}

async fn save(stopwatch: &mut Stopwatch) -> AppResult<()> {
    // The Save button is disabled while the timer runs.
    if !panel::save_enabled(stopwatch.state()) {
        println!();
        warning("Stop the stopwatch before saving");
        return Ok(());
    }

    let Some(time_record) = stopwatch.begin_save() else {
        println!();
        warning("Nothing to save yet: start the stopwatch first");
        return Ok(());
    };

    println!("\n{}", panel::save_button(stopwatch.state()));
    std::io::stdout().flush()?;

    match stopwatch.commit_save(time_record).await {
        SaveOutcome::Saved { record } => {
            alert(format!("Saved time {} successfully!", record.time_record));
            stopwatch.load_records().await;
            print!("{}", panel::render(stopwatch.state()));
        }
        SaveOutcome::Failed { message, .. } => {
            alert(format!("Error saving time: {}", message));
        }
        SaveOutcome::NothingToSave => {}
    }
    Ok(())
}
