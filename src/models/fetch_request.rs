use alloy::primitives::Address;

use super::{block_range::BlockRange, tx_category::TxCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub address: Address,
    pub range: BlockRange,
    pub category: TxCategory,
}

impl FetchRequest {
    pub fn new(address: Address, range: BlockRange, category: TxCategory) -> Self {
        Self {
            address,
            range,
            category,
        }
    }

    pub fn with_range(&self, range: BlockRange) -> Self {
        Self { range, ..*self }
    }
}
