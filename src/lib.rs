//! Parcinfo IT Asset Inventory Management System
//!
//! A Rust implementation of the Parcinfo inventory server, providing a REST
//! JSON API for tracking IT equipment, the employees and locations it is
//! attached to, and a small rule-based chatbot over the inventory.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
