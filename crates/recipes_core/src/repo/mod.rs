//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate locking and collection details from service orchestration.
//!
//! # Invariants
//! - Every repository operation is atomic with respect to the others.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`) in
//!   addition to lock failures.

pub mod recipe_repo;
