use std::{str::FromStr, time::Duration};

use eyre::Result;
use tracing::debug;

use super::{
    account_activity::{ActivitySettings, NORMAL_CHUNK_SIZE, NORMAL_CONCURRENCY},
    explorer_client::EtherscanClient,
};

pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/v2/api";

#[derive(Clone, Debug, clap::Parser)]
pub struct ExplorerOpts {
    #[arg(
        long,
        help = "Block explorer API key",
        env = "ETHERSCAN_API_KEY",
        hide_env_values = true
    )]
    pub etherscan_api_key: String,

    #[arg(
        long,
        help = "Block explorer API endpoint",
        env = "ETHERSCAN_API_URL",
        default_value = DEFAULT_API_URL
    )]
    pub api_url: String,

    #[arg(long, help = "Chain ID passed to the explorer", env = "CHAIN_ID", default_value_t = 1)]
    pub chain_id: u64,

    #[arg(
        long,
        help = "Timeout for a single explorer request in milliseconds",
        default_value_t = 30_000
    )]
    pub request_timeout_ms: u64,
}

#[derive(Clone, Debug, clap::Parser)]
pub struct FetchOpts {
    #[arg(
        long,
        help = "Delay between request batches in milliseconds",
        env = "RATE_LIMIT_DELAY_MS",
        default_value_t = 1000
    )]
    pub rate_limit_delay_ms: u64,

    #[arg(long, help = "Block span of one normal txs chunk", default_value_t = NORMAL_CHUNK_SIZE)]
    pub normal_chunk_size: u64,

    #[arg(long, help = "Normal txs chunks fetched concurrently", default_value_t = NORMAL_CONCURRENCY)]
    pub normal_concurrency: usize,
}

impl FetchOpts {
    pub fn activity_settings(&self) -> ActivitySettings {
        let pacing_delay = Duration::from_millis(self.rate_limit_delay_ms);
        ActivitySettings {
            normal_chunk_size: self.normal_chunk_size.max(1),
            normal_concurrency: self.normal_concurrency.max(1),
            pacing_delay,
            head_pause: pacing_delay * 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Default,
    Json,
    JsonPretty,
}

impl FromStr for OutputFormat {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "json" => Ok(Self::Json),
            "json-pretty" => Ok(Self::JsonPretty),
            _ => Err(eyre::eyre!("Invalid output format")),
        }
    }
}

pub fn init_explorer(opts: &ExplorerOpts) -> Result<EtherscanClient> {
    debug!(api_url = %opts.api_url, chain_id = opts.chain_id, "Initializing explorer client");
    let client = EtherscanClient::new(
        &opts.api_url,
        opts.etherscan_api_key.clone(),
        opts.chain_id,
        Duration::from_millis(opts.request_timeout_ms),
    )?;
    Ok(client)
}
