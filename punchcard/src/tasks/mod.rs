//! Task list synchronization against authoritative server state.
//!
//! The server owns every task record; the client caches the collection it
//! last received and keeps a registry of display tickers for tasks the
//! server reported as running. Registry membership is re-derived from the
//! collection after every state change, so a missed cleanup heals on the
//! next mutation or fetch.

pub mod registry;
pub mod store;

pub use registry::TickerRegistry;
pub use store::TaskList;
