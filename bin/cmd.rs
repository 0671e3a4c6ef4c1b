pub mod balance;
pub mod serve;
pub mod txs;
