pub mod account_activity;
pub mod args_parsing;
pub mod balance_resolver;
pub mod batch_scheduler;
pub mod errors;
pub mod explorer_client;
#[cfg(test)]
pub mod mock_explorer;
pub mod range_fetcher;
pub mod shared_init;
pub mod utils;
