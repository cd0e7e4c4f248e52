//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of each value
//! (default, file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "skip_bomb_pots": {
//!     "value": true,
//!     "source": "default"
//!   },
//!   "min_hands": {
//!     "value": 20,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, _err: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;

    let display = serde_json::json!({
        "skip_bomb_pots": {
            "value": config.skip_bomb_pots,
            "source": sources.skip_bomb_pots,
        },
        "min_hands": {
            "value": config.min_hands,
            "source": sources.min_hands,
        },
        "threads": {
            "value": config.threads,
            "source": sources.threads,
        },
    });
    ui::write_json(out, &display)?;
    Ok(())
}
