//! REST API client module for the Winged backend.
//!
//! The API uses DRF token authentication: a token obtained from
//! `POST /api/token/` is presented on every request as
//! `Authorization: Token <value>`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
