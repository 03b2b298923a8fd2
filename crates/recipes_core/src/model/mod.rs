//! Domain model for recipe records.
//!
//! # Responsibility
//! - Define the canonical recipe shape shared by the store and transport.
//! - Keep caller input separate from store-assigned fields.
//!
//! # Invariants
//! - Every stored recipe is identified by a non-empty `RecipeId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod recipe;
