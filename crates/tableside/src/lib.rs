//! # Tableside
//!
//! Table-occupancy leasing and order sessions for dine-in restaurants.
//!
//! A table is *leased* by the first order placed at it and stays leased
//! until staff release it, whatever happens to its orders in between. Each
//! lease period is a session identified by a [`SessionEpoch`](model::SessionEpoch);
//! customers prove they belong to the current session with the
//! [`CustomerToken`](model::CustomerToken) they got back from their first order.
//!
//! ## Layout
//!
//! - [`table_actor`] and [`order_actor`]: resource actors built on
//!   `actor_framework`, one per resource, each the single writer of its store.
//! - [`clients`]: typed wrappers around the actors' request channels.
//! - [`session`]: the coordinator that enforces exclusivity across both.
//! - [`catalog`]: menu lookup behind the [`MenuCatalog`](catalog::MenuCatalog) trait.
//! - [`events`]: per-outlet change notifications for staff dashboards.
//! - [`lifecycle`]: spawning, shutdown and tracing setup.
//!
//! ## Testing
//!
//! Clients are tested against `actor_framework::mock`; the full flow runs
//! against real actors in `tests/`.

pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod session;
pub mod table_actor;
pub mod token;
