pub mod activity_json;
pub mod balance_json;
pub mod status_json;
