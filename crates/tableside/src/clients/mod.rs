//! Domain clients. Each wraps a `ResourceClient` and speaks in domain types
//! and domain errors.

pub mod order_client;
pub mod table_client;

pub use order_client::OrderClient;
pub use table_client::TableClient;
