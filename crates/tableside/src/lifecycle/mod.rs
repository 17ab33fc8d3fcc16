//! # Service Lifecycle
//!
//! Starting, wiring and stopping the two resource actors behind the session
//! coordinator.
//!
//! ## Wiring
//!
//! Neither actor depends on the other. The table registry and the order
//! lifecycle both run with an empty context; the coordinator is the only
//! place that holds both clients:
//!
//! ```rust,ignore
//! let (table_actor, tables) = table_actor::new(config.channel_capacity);
//! let (order_actor, orders) = order_actor::new(config.channel_capacity, catalog);
//!
//! let table_handle = tokio::spawn(table_actor.run(()));
//! let order_handle = tokio::spawn(order_actor.run(()));
//!
//! let coordinator = SessionCoordinator::new(tables, orders, EventBus::new(config.event_capacity));
//! ```
//!
//! ## Graceful Shutdown
//!
//! Dropping every clone of the coordinator closes both request channels.
//! Each actor sees `recv()` return `None`, logs its final size and exits.
//! [`FrontOfHouse::shutdown`] drops its own coordinator and awaits both
//! tasks, so callers must drop any clones they handed out first.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Claims, conflicts, releases
//! RUST_LOG=debug cargo run     # Resolved snapshots and actor traffic
//! ```

pub mod front_of_house;
pub mod tracing;

pub use self::front_of_house::*;
pub use self::tracing::*;
