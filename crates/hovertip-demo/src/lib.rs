#![forbid(unsafe_code)]

//! Command-line demo comparing post-paint and pre-paint tooltip measurement.
//!
//! Two buttons sit near the top edge of the page. Each has a two-line
//! tooltip that does not fit above it, so once measured it flips below. The
//! demo scripts a pointer over both buttons and prints every painted frame,
//! then a flicker report.
//!
//! ```sh
//! cargo run -p hovertip-demo -- --timing both --latency-ms 100
//! cargo run -p hovertip-demo -- --timing post-paint --json
//! ```

pub mod cli;
pub mod error;
pub mod page;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
