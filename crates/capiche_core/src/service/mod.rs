//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry and entity calls into UI-facing use cases.
//! - Keep the UI layer decoupled from storage details.

pub mod project_service;
