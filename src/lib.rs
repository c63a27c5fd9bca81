//! toolbelt - a pocket toolbox for the terminal
//!
//! This library holds the logic behind every `toolbelt` subcommand: small
//! fetch/transform/output tools (crypto prices, news, weather, jokes), local
//! file tools (word frequency, spreadsheet export, file sorting, task board)
//! and two terminal games. The tools share only plumbing: the HTTP port,
//! the console shell, configuration and output rendering.

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
    clippy::cargo_common_metadata,
    async_fn_in_trait
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod console;
pub mod crypto;
pub mod export;
pub mod hangman;
pub mod http;
pub mod jokes;
pub mod news;
pub mod output;
pub mod paths;
pub mod sorter;
pub mod tasks;
pub mod tictactoe;
pub mod weather;
pub mod words;
