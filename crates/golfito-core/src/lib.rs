//! # Golfito Core
//!
//! The domain layer of the Golfito authentication service.
//! This crate holds the user model, the typed collaborator errors and the
//! ports that infrastructure must implement. It has no infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{EmailError, TokenError, UserError};
