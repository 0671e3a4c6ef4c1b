use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use alloy::primitives::Address;
use serde_json::{Map, Value};
use tokio::time::{Instant, sleep};

use crate::{
    misc::{
        errors::{FetchError, Result},
        explorer_client::ExplorerApi,
    },
    models::{
        block_range::BlockRange, fetch_request::FetchRequest, tx_category::TxCategory,
        tx_record::TxRecord,
    },
};

pub const GENESIS_TIMESTAMP: i64 = 1_438_269_973;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub category: TxCategory,
    pub range: BlockRange,
    pub at: Instant,
}

// In-memory explorer: txs live at fixed block heights, one record per entry.
#[derive(Default)]
pub struct MockExplorer {
    pub txs: Vec<(TxCategory, u64)>,
    pub failing_ranges: HashSet<BlockRange>,
    pub delays: HashMap<BlockRange, Duration>,
    pub head: u64,
    pub seconds_per_block: i64,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl MockExplorer {
    pub fn with_txs(category: TxCategory, blocks: impl IntoIterator<Item = u64>) -> Self {
        Self {
            txs: blocks.into_iter().map(|b| (category, b)).collect(),
            head: 20_000_000,
            seconds_per_block: 12,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ranges(&self) -> Vec<BlockRange> {
        self.calls().into_iter().map(|c| c.range).collect()
    }
}

pub fn record_at(block: u64, n: usize) -> TxRecord {
    let mut fields = Map::new();
    fields.insert("hash".to_string(), Value::String(format!("0x{block:x}{n:04x}")));
    fields.insert("blockNumber".to_string(), Value::String(block.to_string()));
    TxRecord::new(fields)
}

impl ExplorerApi for MockExplorer {
    async fn account_txs(&self, request: &FetchRequest, limit: usize) -> Result<Vec<TxRecord>> {
        self.calls.lock().unwrap().push(RecordedCall {
            category: request.category,
            range: request.range,
            at: Instant::now(),
        });

        if let Some(delay) = self.delays.get(&request.range) {
            sleep(*delay).await;
        }

        if self.failing_ranges.contains(&request.range) {
            return Err(FetchError::Upstream {
                action: request.category.action(),
                message: "NOTOK (Max rate limit reached)".to_string(),
            });
        }

        let mut blocks: Vec<u64> = self
            .txs
            .iter()
            .filter(|(category, block)| {
                *category == request.category
                    && *block >= request.range.from
                    && *block <= request.range.to
            })
            .map(|(_, block)| *block)
            .collect();
        blocks.sort_unstable();

        Ok(blocks
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(n, block)| record_at(block, n))
            .collect())
    }

    async fn latest_block(&self) -> Result<u64> {
        Ok(self.head)
    }

    async fn block_by_timestamp(&self, timestamp: i64) -> Result<u64> {
        if timestamp < GENESIS_TIMESTAMP {
            return Err(FetchError::NoBlockForTimestamp {
                timestamp,
                reason: "NOTOK (Error! No closest block found)".to_string(),
            });
        }
        Ok(((timestamp - GENESIS_TIMESTAMP) / self.seconds_per_block.max(1)) as u64)
    }

    async fn balance_at(&self, _address: Address, block: u64) -> Result<String> {
        Ok((block * 1_000).to_string())
    }

    async fn token_balance_at(
        &self,
        _contract: Address,
        _address: Address,
        block: u64,
    ) -> Result<String> {
        Ok((block * 7).to_string())
    }
}
