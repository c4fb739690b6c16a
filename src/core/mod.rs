//! Core business logic layer
//!
//! Contact records, the filter/sort/paginate pipeline, the interactive
//! state container and dataset loading.

pub mod data;
pub mod operations;
pub mod pagination;
pub mod query;
pub mod seed;
pub mod state;
pub mod traits;
