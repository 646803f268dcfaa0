//! Route modules for the API server
//!
//! All routes are organized into modules:
//! - summary: financial summary and monthly chart data
//! - transactions: list, filter, create, delete
//! - categories: category list
//! - recommendations: AI recommendation fetch and refresh

pub mod categories;
pub mod recommendations;
pub mod summary;
pub mod transactions;
