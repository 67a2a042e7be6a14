//! Library Console
//!
//! An interactive text console for managing library members, books and
//! loans stored in a hosted table store.

pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};
