//! Structured logging for the dashboard.
//!
//! Every record is one JSON object per line:
//! 1. Level filtering via `LOG_LEVEL` (trace → fatal)
//! 2. Domain filtering via `LOG_DOMAINS` (comma-separated or "all")
//! 3. A process-wide `run_id` and monotonically increasing `seq`
//! 4. Optional persistence to `<LOG_DIR>/<run_id>/events.jsonl`

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or(Level::Info)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Artifact, // Chart file lookups and cache hits
    Render,   // Page composition
    Http,     // Requests and responses
    System,   // Startup, shutdown
    Profile,  // Timing scopes
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Artifact => "artifact",
            Domain::Render => "render",
            Domain::Http => "http",
            Domain::System => "system",
            Domain::Profile => "profile",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    events: Option<Mutex<BufWriter<File>>>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let events = std::env::var("LOG_DIR")
            .ok()
            .and_then(|base| open_events_file(PathBuf::from(base).join(&run_id)))
            .map(|f| Mutex::new(BufWriter::new(f)));
        RunContext { run_id, events }
    })
}

fn open_events_file(run_dir: PathBuf) -> Option<File> {
    if let Err(err) = create_dir_all(&run_dir) {
        eprintln!("[log] failed to create run dir {}: {}", run_dir.display(), err);
        return None;
    }
    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(run_dir.join("events.jsonl"))
    {
        Ok(f) => Some(f),
        Err(err) => {
            eprintln!("[log] failed to open events log: {}", err);
            None
        }
    }
}

static WRITE_FAILED: AtomicBool = AtomicBool::new(false);

fn write_line(writer: &Mutex<BufWriter<File>>, line: &str) {
    if let Ok(mut w) = writer.lock() {
        let result = writeln!(w, "{}", line).and_then(|_| w.flush());
        report_write_failure(result);
    }
}

/// Warns on stderr the first time the events file cannot be written.
/// Returns true when a warning was printed.
fn report_write_failure(result: std::io::Result<()>) -> bool {
    match result {
        Err(err) if !WRITE_FAILED.swap(true, Ordering::SeqCst) => {
            eprintln!("[log] failed to write events log: {}", err);
            true
        }
        _ => false,
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let ctx = ensure_run_context();
    let line = Value::Object(build_record(&ctx.run_id, level, domain, event, fields)).to_string();
    if let Some(events) = &ctx.events {
        write_line(events, &line);
    }
    eprintln!("{}", line);
}

fn build_record(
    run_id: &str,
    level: Level,
    domain: Domain,
    event: &str,
    mut fields: Map<String, Value>,
) -> Map<String, Value> {
    let msg = fields.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(run_id));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    entry.insert("data".to_string(), Value::Object(fields));
    entry
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_artifact_loaded(name: &str, path: &str, bytes: usize) {
    log(
        Level::Debug,
        Domain::Artifact,
        "artifact_loaded",
        obj(&[
            ("artifact", v_str(name)),
            ("path", v_str(path)),
            ("bytes", json!(bytes)),
        ]),
    );
}

pub fn log_artifact_missing(name: &str, path: &str) {
    log(
        Level::Warn,
        Domain::Artifact,
        "artifact_missing",
        obj(&[("artifact", v_str(name)), ("path", v_str(path))]),
    );
}

pub fn log_page_rendered(page: &str, sections: usize, present: usize, missing: usize) {
    log(
        Level::Info,
        Domain::Render,
        "page_rendered",
        obj(&[
            ("page", v_str(page)),
            ("sections", json!(sections)),
            ("present", json!(present)),
            ("missing", json!(missing)),
        ]),
    );
}

pub fn log_request(method: &str, path: &str, status: u16, elapsed_ms: f64) {
    let level = if status >= 500 { Level::Error } else { Level::Info };
    log(
        level,
        Domain::Http,
        "request",
        obj(&[
            ("method", v_str(method)),
            ("path", v_str(path)),
            ("status", json!(status)),
            ("elapsed_ms", v_num(elapsed_ms)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Profiling Scope
// =============================================================================

/// Profiling scope that emits structured timing on drop.
pub struct ProfileScope {
    label: &'static str,
    context: Map<String, Value>,
    started: Instant,
}

impl ProfileScope {
    pub fn with_context(label: &'static str, fields: &[(&str, Value)]) -> Self {
        Self {
            label,
            context: obj(fields),
            started: Instant::now(),
        }
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut fields = std::mem::take(&mut self.context);
        fields.insert("label".to_string(), v_str(self.label));
        fields.insert("elapsed_ms".to_string(), v_num(elapsed_ms));
        log(Level::Trace, Domain::Profile, "profile", fields);
    }
}

// =============================================================================
// Tests
// =============================================================================
