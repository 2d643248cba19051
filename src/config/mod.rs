//! Configuration modules for the Laurel API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables via a `from_env` constructor:
//!
//! - [`cors`]: CORS allowed origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP configuration for confirmation-code delivery
//! - [`jwt`]: JWT signing secret and token expiry

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
