//! FitFam Trainer Library
//!
//! Fitness catalog and queries, grocery aggregation, client state stores and
//! the document store services behind the FitFam MCP server.

pub mod build_info;
pub mod calculations;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod remote;
pub mod store;
pub mod tools;
pub mod validation;

pub use error::{AppError, AppResult};
