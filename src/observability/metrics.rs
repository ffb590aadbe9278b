//! Metrics collection.
//!
//! # Metrics
//! - `search_client_requests_total` (counter): attempts by verb, outcome
//! - `search_client_request_duration_seconds` (histogram): attempt latency by verb
//! - `search_client_eliminations_total` (counter): addresses removed from the pool
//! - `search_client_refreshes_total` (counter): pool refreshes by result
//! - `search_client_live_servers` (gauge): live addresses after refresh/elimination
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs the exporter
//! - Labels are low-cardinality: no paths, no addresses

use std::time::Instant;

use metrics::{counter, gauge, histogram};

/// Outcome label of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ConnectionFailure,
    Timeout,
    ApplicationError,
    InvalidRequest,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::ConnectionFailure => "connection_failure",
            Outcome::Timeout => "timeout",
            Outcome::ApplicationError => "application_error",
            Outcome::InvalidRequest => "invalid_request",
        }
    }
}

pub fn record_request(verb: &'static str, outcome: Outcome, start: Instant) {
    counter!("search_client_requests_total", "verb" => verb, "outcome" => outcome.as_str())
        .increment(1);
    histogram!("search_client_request_duration_seconds", "verb" => verb)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_elimination(live: usize) {
    counter!("search_client_eliminations_total").increment(1);
    gauge!("search_client_live_servers").set(live as f64);
}

pub fn record_refresh(ok: bool, live: usize) {
    let result = if ok { "ok" } else { "error" };
    counter!("search_client_refreshes_total", "result" => result).increment(1);
    if ok {
        gauge!("search_client_live_servers").set(live as f64);
    }
}
