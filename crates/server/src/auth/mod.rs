//! # Authentication
//!
//! Client calls to the `/ai` routes carry a shared service key in the
//! `x-ai-api-key` header.

pub mod api_key;
