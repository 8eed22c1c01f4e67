//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `diary-insight-server`.

pub mod ai_handlers;
pub mod ai_types;
pub mod general;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use ai_handlers::*;
pub use general::*;

use super::{errors::AppError, state::AppState};
