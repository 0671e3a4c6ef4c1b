use serde::Serialize;

use crate::misc::balance_resolver::BalanceAtDate;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceJson {
    pub success: bool,
    pub balance: String,
    pub token_balance: Option<String>,
    pub block_number: u64,
}

impl From<BalanceAtDate> for BalanceJson {
    fn from(result: BalanceAtDate) -> Self {
        Self {
            success: true,
            balance: result.balance,
            token_balance: result.token_balance,
            block_number: result.block_number,
        }
    }
}
