//! Tag search entry points.
//!
//! # Responsibility
//! - Own the tag-match predicate used by the recipe store.
//! - Keep comparison rules in one place so store and tests agree.

pub mod tag;
