//! Application setup and initialization.

pub mod routes;
pub mod server;
