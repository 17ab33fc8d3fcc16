//! Domain data structures. Pure data; behaviour lives in the actor modules.

mod ids;
mod order;
mod table;

pub use ids::*;
pub use order::*;
pub use table::*;
