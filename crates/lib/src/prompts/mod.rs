//! # Prompt Template Modules
//!
//! This module organizes the prompt templates used by the analysis and image
//! pipelines. The server loads them as defaults; `config.yml` or `prompt.yml`
//! can override any of them.

pub mod tasks;
