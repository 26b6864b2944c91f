//! # stevedore-cli
//!
//! Command-line client for remote container workload management.
//!
//! Provides commands for:
//! - Service health probing
//! - Starting containers from an image reference
//! - Listing and inspecting container snapshots
//! - Pausing, resuming, and terminating containers
//!
//! # Architecture
//!
//! The CLI connects to a container-management service via WebSocket using
//! the protocol defined in `stevedore-proto`. The [`client::ServiceClient`]
//! handles connection establishment and request/response serialization.
//!
//! ```text
//! ┌───────────┐      Protocol        ┌───────────────────┐
//! │ stevedore │◄────────────────────►│ container service │
//! └───────────┘     (WebSocket)      └───────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format, StartArgs};
pub use client::ServiceClient;
pub use error::CliError;
pub use output::OutputFormat;
