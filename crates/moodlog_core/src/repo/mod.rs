//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `NewDiaryEntry::validate()` before
//!   persistence.
//! - The diary is append-only: no update or delete APIs exist.

pub mod diary_repo;
