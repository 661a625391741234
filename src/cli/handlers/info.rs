//! Information display handlers

use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

pub async fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config);
    Ok(())
}
