//! Config inspection and initialisation

use crate::cli::app::ConfigAction;
use toolbelt::config::Config;
use toolbelt::output::{OperationResult, OutputMode, Render};
use toolbelt::paths;

/// Handle config subcommands
pub fn config(action: ConfigAction, config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            match mode {
                OutputMode::Human => print!("{}", config.to_toml()?),
                OutputMode::Json => println!("{}", serde_json::to_string_pretty(config)?),
            }
            Ok(())
        },
        ConfigAction::Path => {
            OperationResult::ok(paths::config_file().display().to_string()).render(mode);
            Ok(())
        },
        ConfigAction::Init { force } => init(force, mode),
    }
}

fn init(force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = paths::config_file();
    if path.exists() && !force {
        OperationResult {
            success: false,
            message: format!("Config already exists at {}. Use --force to overwrite.", path.display()),
        }
        .render(mode);
        return Ok(());
    }

    Config::default().save(&path)?;
    OperationResult::ok(format!("Wrote default config to {}", path.display())).render(mode);
    Ok(())
}
