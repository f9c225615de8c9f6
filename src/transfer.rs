//! Request and response payloads, one module per resource.
//!
//! Request payloads keep every field optional on the wire so that a missing
//! field is reported as a field error rather than a deserialization failure.

pub mod profiles;
pub mod session;
pub mod users;
pub mod videos;
