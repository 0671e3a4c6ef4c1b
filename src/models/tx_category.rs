use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxCategory {
    Normal,
    Internal,
    Token,
    Nft,
}

impl TxCategory {
    pub fn all() -> [Self; 4] {
        [Self::Normal, Self::Internal, Self::Token, Self::Nft]
    }

    pub fn action(&self) -> &'static str {
        match self {
            TxCategory::Normal => "txlist",
            TxCategory::Internal => "txlistinternal",
            TxCategory::Token => "tokentx",
            TxCategory::Nft => "tokennfttx",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TxCategory::Normal => "normal",
            TxCategory::Internal => "internal",
            TxCategory::Token => "token",
            TxCategory::Nft => "nft",
        }
    }
}

impl fmt::Display for TxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
