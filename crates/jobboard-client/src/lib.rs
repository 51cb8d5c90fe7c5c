//! JobBoard REST API client.
//!
//! This crate provides:
//! - An HTTP client that attaches the session's bearer token to every call
//! - Normalisation of every outcome into the `{ success, data, message }` envelope
//! - Feature services for auth, jobs, applications, profile and admin endpoints
//! - Environment-driven configuration and request metrics

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod services;
pub mod token;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use services::{
    AdminService, ApplicationService, AuthApi, JobService, PageRequest, ProfileService,
};
pub use token::{NoToken, StaticToken, TokenProvider};
