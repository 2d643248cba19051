//! Authentication extractor and authorization policies.

pub mod auth;
pub mod permissions;
