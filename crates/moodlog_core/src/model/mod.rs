//! Domain model shared by analyzers, mood inference and the diary.
//!
//! # Responsibility
//! - Define explicit records for every inter-component contract.
//! - Keep vocabularies (emotion, sentiment, mood) closed and typed.
//!
//! # Invariants
//! - Analyzer outputs are immutable once produced.
//! - Diary entries are append-only.

pub mod diary;
pub mod emotion;
pub mod modality;
pub mod mood;
pub mod sentiment;
