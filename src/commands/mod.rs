//! Entry points behind the command-line subcommands
//!
//! Each command checks its configuration before any network activity, runs
//! one pipeline and reports the outcome. Partial failures inside a run are
//! reported in the returned summary, not as errors.

mod embed;
mod import;

pub use embed::generate_embeddings;
pub use import::{ImportOptions, ImportReport, import_products};

use crate::config::Config;
use crate::utils::error::Result;
use crate::utils::net::{HttpClientConfig, create_client};

fn http_client(config: &Config) -> Result<reqwest::Client> {
    let client_config =
        HttpClientConfig::default().with_connect_timeout(config.remote.connect_timeout());
    create_client(&client_config)
}
