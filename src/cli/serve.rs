use std::sync::Arc;

use anyhow::Result;

use crate::http;
use crate::utils::config::Config;
use crate::utils::logging;

/// Run the HTTP server in the foreground
#[derive(Debug, Default)]
pub struct ServeCommand;

impl ServeCommand {
    pub async fn run(&self, config: Config) -> Result<()> {
        logging::log_config(&config);
        http::run_server(Arc::new(config)).await
    }
}
