//! Template functions available inside naming patterns.
//!
//! A naming pattern may call five functions: `now`, `creation`, `hash`,
//! `uuid` and `autoincrement`. Three of them are stateful, and their
//! freshness semantics differ deliberately:
//!
//! - `now(format)` samples the clock once per [`NamingSession`] and keeps
//!   returning that same instant, so every repository named in one run
//!   carries the same timestamp;
//! - `creation(format)` samples the clock on every call;
//! - `autoincrement()` increments a counter shared across every render in
//!   the session and is never reset.
//!
//! The session is an explicit value rather than process-global state so
//! that independent runs (and tests) get independent counters and
//! timestamps by constructing their own session.

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tera::{Tera, Value};
use uuid::Uuid;

/// Fallback chrono format when a time function is called without `format`.
const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d";

/// Shared state backing the stateful naming functions.
///
/// Cloning a session is cheap and every clone observes the same cached
/// timestamp and counter. The interior is synchronized because Tera
/// requires registered functions to be `Send + Sync`; the grouping engine
/// itself never renders concurrently.
#[derive(Clone, Debug, Default)]
pub struct NamingSession {
    state: Arc<SessionState>,
}

#[derive(Debug, Default)]
struct SessionState {
    /// Timestamp captured lazily by the first `now()` call.
    started_at: OnceLock<DateTime<Local>>,
    /// Counter behind `autoincrement()`, pre-increment value.
    counter: AtomicU64,
}

impl NamingSession {
    /// Create a fresh session with an unset timestamp and a counter at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The session timestamp, sampling the clock on first use.
    pub(crate) fn fixed_now(&self) -> DateTime<Local> {
        *self.state.started_at.get_or_init(Local::now)
    }

    /// Increment the shared counter and return the new value (1, 2, 3, …).
    pub(crate) fn next_counter(&self) -> u64 {
        self.state.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Register all five naming functions on a Tera instance.
    ///
    /// `now` deliberately shadows Tera's built-in function of the same
    /// name: the built-in samples the clock per call, while naming
    /// patterns rely on one stable instant per session.
    pub(crate) fn register_functions(&self, tera: &mut Tera) {
        let session = self.clone();
        tera.register_function(
            "now",
            move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let format = time_format(args)?;
                Ok(Value::String(session.fixed_now().format(&format).to_string()))
            },
        );

        tera.register_function(
            "creation",
            |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let format = time_format(args)?;
                Ok(Value::String(Local::now().format(&format).to_string()))
            },
        );

        tera.register_function("hash", |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let input = match args.get("input") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                // An empty or missing input hashes a fresh UUID instead,
                // which makes the result non-deterministic across calls.
                Some(Value::String(_)) | None => Uuid::new_v4().to_string(),
                Some(other) => {
                    return Err(tera::Error::msg(format!(
                        "hash() expects a string `input`, got `{other}`"
                    )));
                }
            };
            let mut hasher = Sha256::new();
            hasher.update(input.as_bytes());
            Ok(Value::String(hex::encode(hasher.finalize())))
        });

        tera.register_function(
            "uuid",
            |_args: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::String(Uuid::new_v4().to_string()))
            },
        );

        let session = self.clone();
        tera.register_function(
            "autoincrement",
            move |_args: &HashMap<String, Value>| -> tera::Result<Value> {
                Ok(Value::from(session.next_counter()))
            },
        );
    }
}

/// Extract the chrono format string from function arguments.
fn time_format(args: &HashMap<String, Value>) -> tera::Result<String> {
    match args.get("format") {
        None => Ok(DEFAULT_TIME_FORMAT.to_string()),
        Some(Value::String(format)) => Ok(format.clone()),
        Some(other) => Err(tera::Error::msg(format!(
            "`format` must be a string, got `{other}`"
        ))),
    }
}
