//! REST API client module for the Calorie AI service.
//!
//! This module provides the `ApiClient` for the account endpoints
//! (`/user/*`) and the analysis endpoints (`/openai/*`).
//!
//! Authenticated calls carry a JWT bearer token obtained through
//! `/user/login` and validated via `/user/profile`.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginRequest, SignupRequest};
pub use error::ApiError;
