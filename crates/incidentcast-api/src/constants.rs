//! API-wide constants.

/// Current API version.
pub const API_VERSION: &str = "v0";

/// Path prefix for all versioned endpoints.
pub const API_PREFIX: &str = "/api/v0";

/// Request header carrying the session key for the pending-batch store.
pub const SESSION_HEADER: &str = "x-session-id";
