//! # buswatch-database
//!
//! PostgreSQL connection management, embedded migrations, and repository
//! implementations for BusWatch.

pub mod connection;
pub mod migration;
pub mod repositories;
