pub mod block_range;
pub mod fetch_request;
pub mod json;
pub mod tx_category;
pub mod tx_record;
