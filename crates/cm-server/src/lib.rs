//! JSON-RPC request dispatcher and stdio server for classmcp.
//!
//! # Overview
//!
//! - [`Dispatcher`]: session state (registry, current framework, config
//!   location) and routing of `initialize`, `tools/*` and `resources/*`
//! - [`serve`] / [`serve_stdio`]: the newline-delimited message loop
//! - [`protocol`]: JSON-RPC 2.0 envelopes and MCP result shapes
//! - [`tools`]: tool names, input schemas and argument types
//!
//! # Crate Dependencies
//!
//! ```text
//! cm-cli ──► cm-server ──► cm-catalog ──► cm-minify ──► cm-core
//!                      └─► cm-config ─────────────────►
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod components;
pub mod dispatcher;
pub mod error;
mod handlers;
pub mod protocol;
mod resources;
pub mod server;
pub mod tools;

#[cfg(test)]
mod testing;

pub use dispatcher::{Dispatcher, SERVER_NAME, SERVER_VERSION};
pub use error::ServerError;
pub use protocol::{Request, RequestId, Response, RpcError, ToolResult};
pub use server::{serve, serve_stdio};
pub use tools::ToolName;
