use futures_util::{FutureExt, future::BoxFuture};
use tracing::{debug, info, warn};

use crate::{
    misc::explorer_client::{ExplorerApi, RESULT_CAP},
    models::{fetch_request::FetchRequest, tx_record::TxRecord},
};

// A u64 range is down to a single block after at most 64 halvings.
pub const MAX_BISECT_DEPTH: u32 = 64;

/// Fetches every record of one category for one address over `request.range`.
///
/// A page that hits the explorer result cap is discarded and the range is split in two,
/// lower half first. Upstream failures are logged and turn into an empty result for the
/// affected sub-range only.
pub fn fetch_range<E: ExplorerApi>(
    explorer: &E,
    request: FetchRequest,
    depth: u32,
) -> BoxFuture<'_, Vec<TxRecord>> {
    async move {
        let range = request.range;
        let category = request.category;

        let txs = match explorer.account_txs(&request, RESULT_CAP).await {
            Ok(txs) => txs,
            Err(e) => {
                warn!(%category, %range, %e, "Fetching txs failed, skipping range");
                return vec![];
            }
        };

        let txs = if txs.len() < RESULT_CAP {
            txs
        } else if range.is_single_block() {
            warn!(%category, block = range.from, "Result cap reached in a single block, txs may be missing");
            txs
        } else if depth >= MAX_BISECT_DEPTH {
            warn!(%category, %range, depth, "Bisection depth limit reached, txs may be missing");
            txs
        } else {
            debug!(%category, %range, depth, "Result cap reached, bisecting range");
            let (lower, upper) = range.bisect();
            let mut merged = fetch_range(explorer, request.with_range(lower), depth + 1).await;
            merged.extend(fetch_range(explorer, request.with_range(upper), depth + 1).await);
            merged
        };

        if depth == 0 {
            info!(%category, %range, count = txs.len(), "Fetched txs");
        }

        txs
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use std::iter::repeat_n;

    use super::*;
    use crate::{
        misc::mock_explorer::MockExplorer,
        models::{block_range::BlockRange, tx_category::TxCategory},
    };

    fn request(from: u64, to: u64) -> FetchRequest {
        FetchRequest::new(
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
                .parse()
                .unwrap(),
            BlockRange::new(from, to).unwrap(),
            TxCategory::Normal,
        )
    }

    #[tokio::test]
    async fn test_under_cap_single_call() {
        let explorer = MockExplorer::with_txs(TxCategory::Normal, [3, 50, 51, 99]);

        let txs = fetch_range(&explorer, request(0, 99), 0).await;

        assert_eq!(txs.len(), 4);
        assert_eq!(explorer.ranges(), vec![BlockRange::new(0, 99).unwrap()]);
    }

    #[tokio::test]
    async fn test_single_block_never_bisects() {
        let explorer = MockExplorer::with_txs(TxCategory::Normal, repeat_n(5, 12_000));

        let txs = fetch_range(&explorer, request(5, 5), 0).await;

        assert_eq!(txs.len(), RESULT_CAP);
        assert_eq!(explorer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cap_overflow_bisects_at_floor_midpoint() {
        let blocks = repeat_n(10, 6_000).chain(repeat_n(90, 6_000));
        let explorer = MockExplorer::with_txs(TxCategory::Normal, blocks);

        let txs = fetch_range(&explorer, request(0, 99), 0).await;

        assert_eq!(
            explorer.ranges(),
            vec![
                BlockRange::new(0, 99).unwrap(),
                BlockRange::new(0, 49).unwrap(),
                BlockRange::new(50, 99).unwrap(),
            ]
        );
        assert_eq!(txs.len(), 12_000);
        assert_eq!(txs.first().unwrap().block_number(), Some(10));
        assert_eq!(txs.last().unwrap().block_number(), Some(90));
    }

    #[tokio::test]
    async fn test_nested_bisection() {
        let blocks = repeat_n(1, 6_000)
            .chain(repeat_n(2, 6_000))
            .chain(repeat_n(3, 6_000));
        let explorer = MockExplorer::with_txs(TxCategory::Normal, blocks);

        let txs = fetch_range(&explorer, request(0, 3), 0).await;

        // [0,3] -> [0,1] + [2,3] -> [2,3] caps again -> [2,2] + [3,3]
        assert_eq!(
            explorer.ranges(),
            vec![
                BlockRange::new(0, 3).unwrap(),
                BlockRange::new(0, 1).unwrap(),
                BlockRange::new(2, 3).unwrap(),
                BlockRange::single(2),
                BlockRange::single(3),
            ]
        );
        assert_eq!(txs.len(), 18_000);
    }

    #[tokio::test]
    async fn test_failed_subrange_degrades_to_empty() {
        let blocks = repeat_n(10, 6_000).chain(repeat_n(90, 6_000));
        let mut explorer = MockExplorer::with_txs(TxCategory::Normal, blocks);
        explorer
            .failing_ranges
            .insert(BlockRange::new(50, 99).unwrap());

        let txs = fetch_range(&explorer, request(0, 99), 0).await;

        assert_eq!(txs.len(), 6_000);
        assert!(txs.iter().all(|tx| tx.block_number() == Some(10)));
        assert_eq!(explorer.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_top_level_call_is_empty() {
        let mut explorer = MockExplorer::with_txs(TxCategory::Normal, [1, 2, 3]);
        explorer.failing_ranges.insert(BlockRange::new(0, 9).unwrap());

        let txs = fetch_range(&explorer, request(0, 9), 0).await;

        assert!(txs.is_empty());
        assert_eq!(explorer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_depth_limit_stops_bisection() {
        let explorer = MockExplorer::with_txs(TxCategory::Normal, repeat_n(7, 11_000));

        let txs = fetch_range(&explorer, request(0, 99), MAX_BISECT_DEPTH).await;

        assert_eq!(txs.len(), RESULT_CAP);
        assert_eq!(explorer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_only_requested_category() {
        let mut explorer = MockExplorer::with_txs(TxCategory::Token, [1, 2]);
        explorer.txs.push((TxCategory::Normal, 1));

        let txs = fetch_range(&explorer, request(0, 9), 0).await;

        assert_eq!(txs.len(), 1);
        assert_eq!(explorer.calls()[0].category, TxCategory::Normal);
    }
}
