use std::{future::Future, time::Duration};

use alloy::primitives::Address;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    misc::errors::{FetchError, Result},
    models::{fetch_request::FetchRequest, tx_record::TxRecord},
};

pub const RESULT_CAP: usize = 10_000;

const NO_RECORDS_MESSAGES: [&str; 2] = ["No transactions found", "No records found"];

pub trait ExplorerApi: Send + Sync {
    fn account_txs(
        &self,
        request: &FetchRequest,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<TxRecord>>> + Send;

    fn latest_block(&self) -> impl Future<Output = Result<u64>> + Send;

    fn block_by_timestamp(&self, timestamp: i64) -> impl Future<Output = Result<u64>> + Send;

    fn balance_at(
        &self,
        address: Address,
        block: u64,
    ) -> impl Future<Output = Result<String>> + Send;

    fn token_balance_at(
        &self,
        contract: Address,
        address: Address,
        block: u64,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<Value>,
}

impl ExplorerResponse {
    fn is_error(&self) -> bool {
        self.status.as_deref() == Some("0") || self.error.is_some()
    }

    fn reason(&self) -> String {
        if let Some(error) = &self.error {
            return error.to_string();
        }
        let message = self.message.as_deref().unwrap_or("NOTOK");
        match &self.result {
            Value::String(detail) if !detail.is_empty() => format!("{message} ({detail})"),
            _ => message.to_string(),
        }
    }

    fn is_empty_listing(&self) -> bool {
        let message = self.message.as_deref().unwrap_or_default();
        NO_RECORDS_MESSAGES.iter().any(|m| message.starts_with(m))
            || matches!(&self.result, Value::Array(items) if items.is_empty())
    }

    fn into_result(self, action: &'static str) -> Result<Value> {
        if self.is_error() {
            return Err(FetchError::Upstream {
                action,
                message: self.reason(),
            });
        }
        Ok(self.result)
    }

    fn into_string(self, action: &'static str) -> Result<String> {
        match self.into_result(action)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(FetchError::Upstream {
                action,
                message: format!("unexpected result {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    api_url: Url,
    api_key: String,
    chain_id: u64,
}

impl EtherscanClient {
    pub fn new(api_url: &str, api_key: String, chain_id: u64, timeout: Duration) -> Result<Self> {
        let api_url = api_url
            .parse::<Url>()
            .map_err(|_| FetchError::InvalidApiUrl(api_url.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url,
            api_key,
            chain_id,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    // Request URLs carry the API key, so they are stripped from transport errors.
    async fn get<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T> {
        let response = self
            .http
            .get(self.api_url.clone())
            .query(&[("chainid", self.chain_id.to_string())])
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ExplorerApi for EtherscanClient {
    async fn account_txs(&self, request: &FetchRequest, limit: usize) -> Result<Vec<TxRecord>> {
        let action = request.category.action();
        debug!(%action, range = %request.range, "Querying account txs");

        let response: ExplorerResponse = self
            .get(&[
                ("module", "account".to_string()),
                ("action", action.to_string()),
                ("address", request.address.to_string()),
                ("startblock", request.range.from.to_string()),
                ("endblock", request.range.to.to_string()),
                ("page", "1".to_string()),
                ("offset", limit.to_string()),
                ("sort", "asc".to_string()),
            ])
            .await?;

        if response.is_error() && response.is_empty_listing() {
            return Ok(vec![]);
        }

        match response.into_result(action)? {
            Value::Array(items) => Ok(serde_json::from_value(Value::Array(items))?),
            Value::Null => Ok(vec![]),
            other => Err(FetchError::Upstream {
                action,
                message: format!("unexpected result {other}"),
            }),
        }
    }

    async fn latest_block(&self) -> Result<u64> {
        let action = "eth_blockNumber";
        let response: ExplorerResponse = self
            .get(&[
                ("module", "proxy".to_string()),
                ("action", action.to_string()),
            ])
            .await?;

        let hex_block = response.into_string(action)?;
        parse_hex_block(&hex_block)
    }

    async fn block_by_timestamp(&self, timestamp: i64) -> Result<u64> {
        let action = "getblocknobytime";
        let response: ExplorerResponse = self
            .get(&[
                ("module", "block".to_string()),
                ("action", action.to_string()),
                ("timestamp", timestamp.to_string()),
                ("closest", "before".to_string()),
            ])
            .await?;

        if response.is_error() {
            let reason = response.reason();
            if reason.contains("closest block") {
                return Err(FetchError::NoBlockForTimestamp { timestamp, reason });
            }
            return Err(FetchError::Upstream {
                action,
                message: reason,
            });
        }

        let block = response.into_string(action)?;
        block
            .trim()
            .parse::<u64>()
            .map_err(|_| FetchError::InvalidBlockNumber(block))
    }

    async fn balance_at(&self, address: Address, block: u64) -> Result<String> {
        let action = "balance";
        let response: ExplorerResponse = self
            .get(&[
                ("module", "account".to_string()),
                ("action", action.to_string()),
                ("address", address.to_string()),
                ("tag", block.to_string()),
            ])
            .await?;

        response.into_string(action)
    }

    async fn token_balance_at(
        &self,
        contract: Address,
        address: Address,
        block: u64,
    ) -> Result<String> {
        let action = "tokenbalance";
        let response: ExplorerResponse = self
            .get(&[
                ("module", "account".to_string()),
                ("action", action.to_string()),
                ("contractaddress", contract.to_string()),
                ("address", address.to_string()),
                ("tag", block.to_string()),
            ])
            .await?;

        response.into_string(action)
    }
}

fn parse_hex_block(input: &str) -> Result<u64> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    u64::from_str_radix(digits, 16).map_err(|_| FetchError::InvalidBlockNumber(input.to_string()))
}
