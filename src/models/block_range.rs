use std::fmt;

use crate::misc::errors::{FetchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRange {
    pub from: u64,
    pub to: u64,
}

impl BlockRange {
    pub fn new(from: u64, to: u64) -> Result<Self> {
        if from > to {
            return Err(FetchError::InvertedRange { from, to });
        }

        Ok(Self { from, to })
    }

    pub fn single(block: u64) -> Self {
        Self {
            from: block,
            to: block,
        }
    }

    pub fn size(&self) -> u64 {
        (self.to - self.from).saturating_add(1)
    }

    pub fn is_single_block(&self) -> bool {
        self.from == self.to
    }

    // Split point is floor((from + to) / 2), computed without overflow.
    pub fn bisect(&self) -> (Self, Self) {
        let mid = self.from + (self.to - self.from) / 2;
        (
            Self {
                from: self.from,
                to: mid,
            },
            Self {
                from: mid + 1,
                to: self.to,
            },
        )
    }

    pub fn chunks(&self, chunk_size: u64) -> Vec<Self> {
        let step = chunk_size.max(1);
        let mut chunks = Vec::new();
        let mut from = self.from;

        loop {
            let to = from.saturating_add(step - 1).min(self.to);
            chunks.push(Self { from, to });
            if to >= self.to {
                break;
            }
            from = to + 1;
        }

        chunks
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
