#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rstopwatch::models::NewSavedTime;
use rstopwatch::store::{RecordStore, SqliteStore};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::thread;
use std::time::Duration;

/// The binary, isolated from the user's real configuration and credentials.
pub fn rsw(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rstopwatch");
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env_remove("RSTOPWATCH_REST_URL")
        .env_remove("RSTOPWATCH_API_KEY")
        .env_remove("RSTOPWATCH_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstopwatch.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Insert rows directly through the library store, oldest first.
pub fn populate(db_path: &str, times: &[&str]) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    rt.block_on(async {
        let store = SqliteStore::open(db_path).expect("open store");
        for t in times {
            store.insert(&NewSavedTime::new(*t)).await.expect("insert");
        }
    });
}

/// Drive `run` interactively: each line is typed, then the given pause is
/// waited out before the next one. Extra env vars are applied after the
/// isolation done by [`rsw`].
pub fn run_with_pauses(
    home: &Path,
    args: &[&str],
    envs: &[(&str, &str)],
    steps: &[(&str, Duration)],
) -> Output {
    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_rstopwatch"))
        .args(args)
        .arg("run")
        .env("HOME", home)
        .env("APPDATA", home)
        .env_remove("RSTOPWATCH_REST_URL")
        .env_remove("RSTOPWATCH_API_KEY")
        .env_remove("RSTOPWATCH_LOG")
        .env_remove("RUST_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rstopwatch run");

    {
        let stdin = child.stdin.as_mut().expect("piped stdin");
        for (line, pause) in steps {
            writeln!(stdin, "{line}").expect("write to stdin");
            stdin.flush().expect("flush stdin");
            thread::sleep(*pause);
        }
    }
    drop(child.stdin.take());

    child.wait_with_output().expect("wait for rstopwatch run")
}
