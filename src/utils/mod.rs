//! Shared utilities for the Laurel API.
//!
//! - [`confirmation`]: confirmation-code derivation and verification
//! - [`email`]: SMTP delivery of confirmation codes
//! - [`errors`]: application error type and HTTP mapping
//! - [`jwt`]: access-token creation and verification
//! - [`pagination`]: list-endpoint pagination parameters
//! - [`validation`]: shared field validators

pub mod confirmation;
pub mod email;
pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod validation;
