//! `DatabaseExecutor` implementations for sqlx pools

pub mod postgres;
pub mod sqlite;
