use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::sleep;
use tracing::debug;

use crate::{
    misc::{explorer_client::ExplorerApi, range_fetcher::fetch_range},
    models::{block_range::BlockRange, fetch_request::FetchRequest, tx_record::TxRecord},
};

pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub chunk_size: u64,
    pub concurrency: usize,
    pub pacing_delay: Duration,
}

impl BatchPlan {
    pub fn new(chunk_size: u64, concurrency: usize, pacing_delay: Duration) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            concurrency: concurrency.max(1),
            pacing_delay,
        }
    }

    // Whole range as one chunk.
    pub fn single_chunk(range: &BlockRange, pacing_delay: Duration) -> Self {
        Self::new(range.size(), 1, pacing_delay)
    }

    pub fn batches(&self, range: &BlockRange) -> Vec<Vec<BlockRange>> {
        range
            .chunks(self.chunk_size)
            .chunks(self.concurrency.max(1))
            .map(<[BlockRange]>::to_vec)
            .collect()
    }
}

pub async fn fetch_batched<E: ExplorerApi>(
    explorer: &E,
    request: FetchRequest,
    plan: &BatchPlan,
) -> Vec<TxRecord> {
    let batches = plan.batches(&request.range);
    debug!(
        category = %request.category,
        range = %request.range,
        batches = batches.len(),
        concurrency = plan.concurrency,
        "Scheduling chunk batches"
    );

    let mut txs = Vec::new();
    for (i, batch) in batches.iter().enumerate() {
        if i > 0 {
            sleep(plan.pacing_delay).await;
        }

        // join_all yields results in chunk order regardless of completion order
        let results = join_all(
            batch
                .iter()
                .map(|chunk| fetch_range(explorer, request.with_range(*chunk), 0)),
        )
        .await;

        for chunk_txs in results {
            txs.extend(chunk_txs);
        }
    }

    txs
}
