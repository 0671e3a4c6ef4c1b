use alloy::primitives::Address;
use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::misc::{
    args_parsing::{parse_address, parse_contract_address, parse_date},
    errors::Result,
    explorer_client::ExplorerApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceQuery {
    pub address: Address,
    pub date: NaiveDate,
    pub contract: Option<Address>,
}

impl BalanceQuery {
    pub fn parse(address: &str, date: &str, contract: Option<&str>) -> Result<Self> {
        Ok(Self {
            address: parse_address(address)?,
            date: parse_date(date)?,
            contract: parse_contract_address(contract)?,
        })
    }

    // Midnight UTC of the requested day.
    pub fn timestamp(&self) -> i64 {
        self.date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceAtDate {
    pub balance: String,
    pub token_balance: Option<String>,
    pub block_number: u64,
}

pub async fn resolve_balance<E: ExplorerApi>(
    explorer: &E,
    query: &BalanceQuery,
) -> Result<BalanceAtDate> {
    let timestamp = query.timestamp();
    let block_number = explorer.block_by_timestamp(timestamp).await?;
    info!(date = %query.date, timestamp, block_number, "Resolved block for date");

    let balance = explorer.balance_at(query.address, block_number).await?;
    let balance = if balance.is_empty() {
        "0".to_string()
    } else {
        balance
    };
    info!(address = %query.address, block_number, %balance, "Native balance");

    let token_balance = match query.contract {
        Some(contract) => {
            let token_balance = explorer
                .token_balance_at(contract, query.address, block_number)
                .await?;
            info!(address = %query.address, %contract, block_number, %token_balance, "Token balance");
            Some(token_balance)
        }
        None => None,
    };

    Ok(BalanceAtDate {
        balance,
        token_balance,
        block_number,
    })
}
