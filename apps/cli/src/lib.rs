//! # PEX Command-Line Library
//!
//! Everything behind the `pex` binary. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! pex_cli/
//! ├── lib.rs          ◄─── You are here (start-up & login)
//! ├── app.rs          ◄─── App context and clock
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── config.rs   ◄─── Environment configuration
//! │   └── inventory.rs◄─── Store + ledger + persistence port
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch and confirmation flow
//! │   ├── product.rs  ◄─── Product registration and views
//! │   ├── sale.rs     ◄─── Sales
//! │   ├── report.rs   ◄─── Reports and CSV export
//! │   └── backup.rs   ◄─── Backup export/import
//! ├── confirm.rs      ◄─── Destructive-action prompts
//! ├── render.rs       ◄─── Table and CSV output
//! ├── advice.rs       ◄─── Advisory text client
//! └── error.rs        ◄─── Command error type
//! ```

pub mod advice;
pub mod app;
pub mod cli;
pub mod commands;
pub mod confirm;
pub mod error;
pub mod render;
pub mod state;

use std::io::{self, IsTerminal};
use std::sync::Arc;

use clap::Parser;
use pex_core::auth::Credentials;
use pex_db::{Database, DbConfig, SnapshotStore, SqliteSnapshotStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::{App, Clock};
use crate::cli::Cli;
use crate::confirm::{prompt_line, AssumeYes, Confirmer, PromptConfirmer};
use crate::error::{AppError, AppResult};
use crate::state::{AppConfig, InventoryState};

/// Runs one `pex` invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments (clap exits on --help / usage errors)              │
/// │  2. Initialize logging (stderr, RUST_LOG overrides)                    │
/// │  3. Load configuration from PEX_* variables, apply --db                │
/// │  4. Login: --user/--password or prompt, checked against the store      │
/// │  5. Open the database, run migrations                                  │
/// │  6. Load inventory + sales, refresh expiry fields for today            │
/// │  7. Execute the command                                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::from_env().with_database_path(cli.db.clone());
    info!(store = %config.store_name, "Starting PEX");

    login(&config.credentials, cli.user.as_deref(), cli.password.as_deref())?;

    let db_path = config.database_file();
    info!(?db_path, "Database path determined");
    let db = Database::new(DbConfig::new(db_path)).await?;

    let snapshots: Arc<dyn SnapshotStore> = Arc::new(SqliteSnapshotStore::new(&db));
    let clock = Clock::system();

    let mut state = InventoryState::load(snapshots).await?;
    state.refresh(clock.today).await?;

    let confirmer: Box<dyn Confirmer> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirmer::stdio())
    };

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut app = App::new(state, config, clock, confirmer, stdout.lock());
    app.color = color;

    let result = app.execute(cli.command).await;
    db.close().await;
    result
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so reports and CSV on stdout stay clean.
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Checks the login, prompting on the terminal for whatever was not given.
fn login(credentials: &Credentials, user: Option<&str>, password: Option<&str>) -> AppResult<()> {
    let (user, password) = match (user, password) {
        (Some(user), Some(password)) => (user.to_string(), password.to_string()),
        (user, password) => {
            let mut input = io::stdin().lock();
            let mut output = io::stderr();
            let user = match user {
                Some(user) => user.to_string(),
                None => prompt_line(&mut input, &mut output, "User")?,
            };
            let password = match password {
                Some(password) => password.to_string(),
                None => prompt_line(&mut input, &mut output, "Password")?,
            };
            (user, password)
        }
    };

    credentials.verify(&user, &password).map_err(|err| {
        warn!(%user, "Login rejected");
        AppError::from(err)
    })?;

    info!(%user, "Login accepted");
    Ok(())
}
