//! Catalog domain types.

pub mod catalog;
pub mod section;
pub mod segments;
