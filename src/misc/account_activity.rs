use std::time::Duration;

use alloy::primitives::Address;
use tokio::time::sleep;
use tracing::info;

use crate::{
    misc::{
        batch_scheduler::{BatchPlan, DEFAULT_PACING_DELAY, fetch_batched},
        errors::Result,
        explorer_client::ExplorerApi,
        utils::{measure_end, measure_start},
    },
    models::{
        block_range::BlockRange, fetch_request::FetchRequest, tx_category::TxCategory,
        tx_record::TxRecord,
    },
};

pub const NORMAL_CHUNK_SIZE: u64 = 1_000_000;
pub const NORMAL_CONCURRENCY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySettings {
    pub normal_chunk_size: u64,
    pub normal_concurrency: usize,
    pub pacing_delay: Duration,
    pub head_pause: Duration,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            normal_chunk_size: NORMAL_CHUNK_SIZE,
            normal_concurrency: NORMAL_CONCURRENCY,
            pacing_delay: DEFAULT_PACING_DELAY,
            head_pause: DEFAULT_PACING_DELAY * 2,
        }
    }
}

impl ActivitySettings {
    pub fn plan_for(&self, category: TxCategory, range: &BlockRange) -> BatchPlan {
        match category {
            TxCategory::Normal => BatchPlan::new(
                self.normal_chunk_size,
                self.normal_concurrency,
                self.pacing_delay,
            ),
            TxCategory::Internal | TxCategory::Token | TxCategory::Nft => {
                BatchPlan::single_chunk(range, self.pacing_delay)
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AccountActivity {
    pub normal: Vec<TxRecord>,
    pub internal: Vec<TxRecord>,
    pub token: Vec<TxRecord>,
    pub nft: Vec<TxRecord>,
}

impl AccountActivity {
    pub fn get(&self, category: TxCategory) -> &[TxRecord] {
        match category {
            TxCategory::Normal => &self.normal,
            TxCategory::Internal => &self.internal,
            TxCategory::Token => &self.token,
            TxCategory::Nft => &self.nft,
        }
    }

    fn slot(&mut self, category: TxCategory) -> &mut Vec<TxRecord> {
        match category {
            TxCategory::Normal => &mut self.normal,
            TxCategory::Internal => &mut self.internal,
            TxCategory::Token => &mut self.token,
            TxCategory::Nft => &mut self.nft,
        }
    }

    pub fn total(&self) -> usize {
        TxCategory::all().iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn into_lists(self) -> [Vec<TxRecord>; 4] {
        [self.normal, self.internal, self.token, self.nft]
    }
}

pub async fn fetch_account_activity<E: ExplorerApi>(
    explorer: &E,
    address: Address,
    start_block: u64,
    settings: &ActivitySettings,
) -> Result<AccountActivity> {
    let head = explorer.latest_block().await?;
    info!(head, "Latest block");

    let mut activity = AccountActivity::default();
    let Ok(range) = BlockRange::new(start_block, head) else {
        info!(start_block, head, "Start block is past the chain head");
        return Ok(activity);
    };

    sleep(settings.head_pause).await;

    let timer = measure_start(&format!("account activity {address} {range}"));
    for (i, category) in TxCategory::all().into_iter().enumerate() {
        // phases run back to back otherwise and would exceed the explorer rate limit
        if i > 0 {
            sleep(settings.pacing_delay).await;
        }

        let plan = settings.plan_for(category, &range);
        let request = FetchRequest::new(address, range, category);
        let txs = fetch_batched(explorer, request, &plan).await;
        activity
            .slot(category)
            .extend(txs.into_iter().map(|tx| tx.tagged(category)));
    }
    measure_end(timer);

    info!(%address, %range, total = activity.total(), "Fetched account activity");
    Ok(activity)
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::misc::mock_explorer::MockExplorer;

    const ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    fn settings() -> ActivitySettings {
        ActivitySettings {
            normal_chunk_size: 1_000,
            normal_concurrency: 5,
            pacing_delay: Duration::from_millis(1000),
            head_pause: Duration::from_millis(2000),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ten_chunks_three_normal_txs() -> eyre::Result<()> {
        let mut explorer = MockExplorer::with_txs(TxCategory::Normal, [5, 4_321, 9_999]);
        explorer.head = 9_999;

        let activity =
            fetch_account_activity(&explorer, ADDRESS.parse()?, 0, &settings()).await?;

        let normal_calls = explorer
            .calls()
            .iter()
            .filter(|c| c.category == TxCategory::Normal)
            .count();
        assert_eq!(normal_calls, 10);
        assert_eq!(activity.normal.len(), 3);
        assert!(activity.normal.iter().all(|tx| tx.category() == Some("normal")));
        assert_eq!(activity.total(), 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_categories_single_call_each() -> eyre::Result<()> {
        let mut explorer = MockExplorer::with_txs(TxCategory::Internal, [100, 200]);
        explorer.txs.push((TxCategory::Token, 300));
        explorer.txs.push((TxCategory::Nft, 400));
        explorer.head = 2_499;

        let activity =
            fetch_account_activity(&explorer, ADDRESS.parse()?, 0, &settings()).await?;

        let calls = explorer.calls();
        let full = BlockRange::new(0, 2_499)?;
        for category in [TxCategory::Internal, TxCategory::Token, TxCategory::Nft] {
            let ranges: Vec<BlockRange> = calls
                .iter()
                .filter(|c| c.category == category)
                .map(|c| c.range)
                .collect();
            assert_eq!(ranges, vec![full]);
        }

        let [normal, internal, token, nft] = activity.into_lists();
        assert!(normal.is_empty());
        assert_eq!(internal.len(), 2);
        assert_eq!(token[0].category(), Some("token"));
        assert_eq!(nft[0].category(), Some("nft"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_phases_are_paced() -> eyre::Result<()> {
        let mut explorer = MockExplorer::with_txs(TxCategory::Normal, [1]);
        explorer.head = 999;

        let started = Instant::now();
        fetch_account_activity(&explorer, ADDRESS.parse()?, 0, &settings()).await?;

        // head pause, then one pacing delay between each of the four phases
        assert_eq!(started.elapsed().as_secs(), 5);
        let offsets: Vec<u64> = explorer
            .calls()
            .iter()
            .map(|c| (c.at - started).as_secs())
            .collect();
        assert_eq!(offsets, vec![2, 3, 4, 5]);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_past_head_is_empty() -> eyre::Result<()> {
        let mut explorer = MockExplorer::with_txs(TxCategory::Normal, [1]);
        explorer.head = 100;

        let activity =
            fetch_account_activity(&explorer, ADDRESS.parse()?, 101, &settings()).await?;

        assert_eq!(activity, AccountActivity::default());
        assert!(explorer.calls().is_empty());
        Ok(())
    }
}
