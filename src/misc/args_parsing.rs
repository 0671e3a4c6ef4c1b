use std::sync::LazyLock;

use alloy::primitives::Address;
use chrono::NaiveDate;
use regex::Regex;

use crate::misc::errors::{FetchError, Result};

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address regex"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

pub fn is_valid_address(input: &str) -> bool {
    ADDRESS_RE.is_match(input)
}

// Checksum casing is not enforced, mixed-case input is accepted as plain hex.
pub fn parse_address(input: &str) -> Result<Address> {
    let input = input.trim();
    if !is_valid_address(input) {
        return Err(FetchError::InvalidAddress(input.to_string()));
    }
    input
        .to_lowercase()
        .parse::<Address>()
        .map_err(|_| FetchError::InvalidAddress(input.to_string()))
}

pub fn parse_contract_address(input: Option<&str>) -> Result<Option<Address>> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    parse_address(input)
        .map(Some)
        .map_err(|_| FetchError::InvalidContractAddress(input.to_string()))
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if !DATE_RE.is_match(input) {
        return Err(FetchError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| FetchError::InvalidDate(input.to_string()))
}

pub fn parse_start_block(input: &str) -> Result<u64> {
    let input = input.trim();
    input
        .parse::<u64>()
        .map_err(|_| FetchError::InvalidStartBlock(input.to_string()))
}

pub fn required<'a>(value: Option<&'a str>, message: &'static str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(FetchError::MissingParams(message))
}
