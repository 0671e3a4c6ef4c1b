use serde::Serialize;

use crate::{misc::account_activity::AccountActivity, models::tx_record::TxRecord};

// `data` is [normal, internal, token, nft]
#[derive(Debug, Serialize)]
pub struct ActivityJson {
    pub success: bool,
    pub data: [Vec<TxRecord>; 4],
}

impl From<AccountActivity> for ActivityJson {
    fn from(activity: AccountActivity) -> Self {
        Self {
            success: true,
            data: activity.into_lists(),
        }
    }
}
