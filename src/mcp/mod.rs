//! MCP server
//!
//! Exposes the FitFam tools over the Model Context Protocol.

mod server;

pub use server::FitFamService;
