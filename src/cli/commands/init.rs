use crate::cli::parser::Cli;
use crate::config::{Backend, Config, ENV_API_KEY, ENV_REST_URL};
use crate::db::initialize::{init_db, saved_times_table_exists};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the local `saved_times` table when the backend is SQLite
pub fn handle(cli: &Cli) -> AppResult<()> {
    let backend = match (&cli.db, cli.backend) {
        (Some(_), _) => Backend::Sqlite,
        (None, Some(b)) => b,
        (None, None) => Backend::Sqlite,
    };

    let cfg = Config::init_all(cli.db.as_deref(), backend, cli.test)?;

    println!("⚙️  Initializing rStopwatch…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }

    match cfg.backend {
        Backend::Sqlite => {
            let db_path = cfg.database_path();
            println!("🗄️  Database   : {}", &db_path);

            let pool = DbPool::new(&db_path)?;
            if saved_times_table_exists(&pool.conn)? {
                info("saved_times table already present");
            } else {
                init_db(&pool.conn)?;
                success(format!("Database initialized at {}", &db_path));
            }
        }
        Backend::Rest => {
            println!("🌐 Backend    : REST table store");
            warning(format!(
                "Set rest.url and rest.api_key in the config file, or export {} and {}",
                ENV_REST_URL, ENV_API_KEY
            ));
        }
    }

    println!("🎉 rStopwatch initialization completed!");
    Ok(())
}
