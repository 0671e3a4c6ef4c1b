pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    MissingParams(&'static str),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Invalid Ethereum address format: '{0}'")]
    InvalidAddress(String),

    #[error("Invalid contract address format: '{0}'")]
    InvalidContractAddress(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid start block: '{0}'")]
    InvalidStartBlock(String),

    #[error("Start block '{from}' must be less than or equal to end block '{to}'")]
    InvertedRange { from: u64, to: u64 },

    #[error("Invalid explorer API URL: {0}")]
    InvalidApiUrl(String),

    #[error("Explorer request failed. (Error: {0})")]
    Transport(#[from] reqwest::Error),

    #[error("Explorer action '{action}' failed: {message}")]
    Upstream { action: &'static str, message: String },

    #[error("Failed to decode explorer response. (Error: {0})")]
    Decode(#[from] serde_json::Error),

    #[error("No block found at or before timestamp {timestamp} ({reason})")]
    NoBlockForTimestamp { timestamp: i64, reason: String },

    #[error("Explorer returned an invalid block number: '{0}'")]
    InvalidBlockNumber(String),
}

impl FetchError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParams(_)
                | Self::InvalidQuery(_)
                | Self::InvalidAddress(_)
                | Self::InvalidContractAddress(_)
                | Self::InvalidDate(_)
                | Self::InvalidStartBlock(_)
                | Self::InvertedRange { .. }
        )
    }

    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::NoBlockForTimestamp { .. } | Self::InvalidBlockNumber(_)
        )
    }
}
