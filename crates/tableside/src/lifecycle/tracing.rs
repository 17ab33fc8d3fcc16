//! # Tracing Setup
//!
//! Structured logging for the whole service. Spans come from `#[instrument]`
//! on the client and coordinator methods, so one placement shows up as
//! `place:try_claim`, `place:create_order` and so on.
//!
//! ```text
//! INFO place: Table claimed table_id=table_1 epoch=5f0c...
//! INFO place: Order placed table_id=table_1 order_id=order_1 epoch=5f0c...
//! WARN place: Session conflict table_id=table_1 open_orders=1 presented=false
//! ```
//!
//! Customer tokens never appear in logs; their `Debug` output is redacted.

/// Install the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
