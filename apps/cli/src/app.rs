//! # App Context
//!
//! What a command runs against: loaded state, configuration, the clock,
//! the confirmation prompt and the output stream.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  App<W: Write>                                               │
//! │    state      InventoryState   (store + ledger + storage)    │
//! │    config     AppConfig                                      │
//! │    clock      Clock            (today / now, read once)      │
//! │    confirmer  Box<dyn Confirmer>                             │
//! │    advice     AdviceClient                                   │
//! │    out        W                (stdout, or a Vec in tests)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use crate::advice::AdviceClient;
use crate::confirm::Confirmer;
use crate::state::{AppConfig, InventoryState};

/// Reference instants for one invocation.
///
/// The core never reads the system clock; every "today" and "now" it sees
/// comes from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// Local calendar date, used for expiry day counts.
    pub today: NaiveDate,

    /// Sale timestamps.
    pub now: DateTime<Utc>,

    /// Report "generated at" stamps.
    pub local_now: NaiveDateTime,
}

impl Clock {
    pub fn system() -> Self {
        let local = Local::now();
        Clock {
            today: local.date_naive(),
            now: local.with_timezone(&Utc),
            local_now: local.naive_local(),
        }
    }

    /// A clock stopped at `local_now`, treating local time as UTC.
    pub fn fixed(local_now: NaiveDateTime) -> Self {
        Clock {
            today: local_now.date(),
            now: local_now.and_utc(),
            local_now,
        }
    }
}

/// Command execution context.
pub struct App<W> {
    pub state: InventoryState,
    pub config: AppConfig,
    pub clock: Clock,
    pub confirmer: Box<dyn Confirmer>,
    pub advice: AdviceClient,
    pub out: W,
    /// ANSI colors in tables.
    pub color: bool,
}

impl<W: Write> App<W> {
    /// Builds a context from its parts, colors off.
    pub fn new(
        state: InventoryState,
        config: AppConfig,
        clock: Clock,
        confirmer: Box<dyn Confirmer>,
        out: W,
    ) -> Self {
        App {
            advice: AdviceClient::new(&config),
            state,
            config,
            clock,
            confirmer,
            out,
            color: false,
        }
    }
}
