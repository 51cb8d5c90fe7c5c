//! JobBoard front end.
//!
//! This crate provides:
//! - Application wiring (`App`) over the session and API crates
//! - View-models for job cards, application review, paged lists and the admin dashboard
//! - Post-login and OAuth navigation
//! - The `jobboard` command line and its text rendering

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod navigation;
pub mod render;
pub mod views;

pub use app::App;
pub use config::AppConfig;
pub use error::{ViewError, ViewResult};
