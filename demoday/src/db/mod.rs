//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL,
//! following the repository pattern: each table gets a repository in
//! [`handlers`] that owns all queries for it, returning record structures
//! from [`models`].
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations plus the registration transaction
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Transactions
//!
//! Repositories borrow a `&mut PgConnection`, so they work equally over a
//! pool-acquired connection (read paths) or inside an open transaction (the
//! registration decision in [`handlers::registrations`]).
//!
//! # Migrations
//!
//! Migrations live in the `migrations/` directory and are embedded via
//! [`crate::migrator`]:
//!
//! ```ignore
//! demoday::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
