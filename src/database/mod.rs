//! # Database Module
//!
//! MongoDB integration: connection bootstrap, the ping-collection query
//! facade, and document models.

pub mod connection;
pub mod models;

pub use connection::PingStore;
pub use models::Ping;
