//! Service layer orchestration for moodlog use-cases.
//!
//! # Responsibility
//! - Compose analyzers, mood inference and recommendations per interaction.
//! - Provide diary save/fetch/export entry points over repositories.

pub mod analysis_service;
pub mod diary_service;
