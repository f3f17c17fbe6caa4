//! Configuration command handler.
//!
//! Prints the effective configuration as pretty JSON, each field paired with
//! the layer that set it:
//!
//! ```json
//! {
//!   "seats": {
//!     "value": 1,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::ui;
use std::io::Write;
use std::path::PathBuf;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if the configuration cannot be loaded or is
/// invalid, `CliError::Io` if writing to `out` fails.
pub fn handle_cfg_command(
    config_path: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let overrides = Overrides {
        config_path,
        ..Overrides::default()
    };
    let resolved = match config::load_with_sources(&overrides) {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "workers": {
            "value": config.workers.map_or_else(|| "auto".into(), serde_json::Value::from),
            "source": sources.workers,
        },
        "seats": { "value": config.seats, "source": sources.seats },
        "bankroll": { "value": config.bankroll, "source": sources.bankroll },
        "base_bet": { "value": config.base_bet, "source": sources.base_bet },
        "bonus_bet": { "value": config.bonus_bet, "source": sources.bonus_bet },
        "win_limit": { "value": config.win_limit, "source": sources.win_limit },
        "loss_limit": { "value": config.loss_limit, "source": sources.loss_limit },
        "max_hands": { "value": config.max_hands, "source": sources.max_hands },
        "stop_on_insufficient_funds": {
            "value": config.stop_on_insufficient_funds,
            "source": sources.stop_on_insufficient_funds,
        },
        "table_rounds": { "value": config.table_rounds, "source": sources.table_rounds },
        "strategy": { "value": config.strategy, "source": sources.strategy },
        "min_parallel_sessions": {
            "value": config.min_parallel_sessions,
            "source": sources.min_parallel_sessions,
        },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            config::CONFIG_ENV,
            config::SEED_ENV,
            config::WORKERS_ENV,
            config::SEATS_ENV,
            config::STRATEGY_ENV,
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_cfg_displays_json_output() {
        clear_env();
        let mut out = Vec::new();
        let mut err = Vec::new();

        handle_cfg_command(None, &mut out, &mut err).unwrap();

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["seats"]["value"], 1);
        assert_eq!(json["seats"]["source"], "default");
        assert_eq!(json["workers"]["value"], "auto");
        assert_eq!(json["strategy"]["value"]["kind"], "basic");
        assert!(json["seed"]["value"].is_null());
        assert!(output.contains("  "), "output should be indented");
        assert!(err.is_empty());
    }

    #[test]
    #[serial]
    fn test_cfg_reports_invalid_environment() {
        clear_env();
        unsafe {
            std::env::set_var(config::SEATS_ENV, "0");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(None, &mut out, &mut err);
        clear_env();

        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(out.is_empty());
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.starts_with("Error: Invalid configuration"));
    }
}
