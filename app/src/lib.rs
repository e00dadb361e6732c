//! Async host for the meal viewer.
//!
//! # Overview
//! Wires `meals-core` to the network: `MealsSession` runs the controller's
//! single fetch on tokio with teardown-aware cancellation, `ReqwestTransport`
//! performs the round-trip and `config` resolves CLI, file and environment
//! settings for the `meals` binary.

pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod transport;

pub use config::{Cli, Config, FileConfig};
pub use error::{AppError, AppResult};
pub use render::{render, Rendered};
pub use session::MealsSession;
pub use transport::{ReqwestTransport, Transport};
