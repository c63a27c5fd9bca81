//! Command implementations

mod config;
mod crypto;
mod export;
mod hangman;
mod jokes;
mod news;
mod sort;
mod tasks;
mod tictactoe;
mod weather;
mod words;

pub use config::config;
pub use crypto::crypto;
pub use export::export;
pub use hangman::hangman;
pub use jokes::jokes;
pub use news::news;
pub use sort::sort;
pub use tasks::tasks;
pub use tictactoe::tictactoe;
pub use weather::weather;
pub use words::words;

use toolbelt::config::Config;
use toolbelt::http::ReqwestClient;

/// HTTP client with the configured timeout
fn http_client(config: &Config) -> anyhow::Result<ReqwestClient> {
    Ok(ReqwestClient::new(config.http.timeout())?)
}
