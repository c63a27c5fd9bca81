//! toolbelt - a pocket toolbox for the terminal
//!
//! One binary, one subcommand per tool. The logic lives in the library; this
//! crate only parses arguments, loads config and renders results.

// Deny all clippy warnings in this crate
#![deny(clippy::all, clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

/// Main entry point for the toolbelt CLI
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
