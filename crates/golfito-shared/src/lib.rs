//! # Golfito Shared
//!
//! Wire types shared with the front end: request bodies, the uniform
//! response envelope, and the input validators the handlers apply.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::ApiResponse;
