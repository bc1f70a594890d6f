//! HTTP handlers.

pub mod cancel;
pub mod confirm;
pub mod health;
pub mod upload;
