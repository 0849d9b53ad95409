pub mod check;
pub mod fix;

use anyhow::Result;
use std::io::IsTerminal;

use crate::api::client::VercelClient;
use crate::core::config::Config;

/// Builds the real API client for a resolved configuration.
pub fn connect(config: &Config) -> Result<VercelClient> {
    let client = VercelClient::new(&config.api, config.target.team_id.clone())?;
    Ok(client.with_progress(std::io::stderr().is_terminal()))
}
