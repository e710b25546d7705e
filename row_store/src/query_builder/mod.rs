//! Query builder utilities
//!
//! This module provides equality filters and SQL construction for both
//! supported dialects.

pub mod filter;
pub mod sql_generation;


pub use filter::Filter;
pub use sql_generation::{Dialect, SqlGenerator, Statement};
