use alloy::primitives::Address;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, warn};

use super::AppState;
use crate::{
    misc::{
        account_activity::fetch_account_activity,
        args_parsing::{parse_address, parse_start_block, required},
        balance_resolver::{BalanceQuery, resolve_balance},
        errors::FetchError,
    },
    models::json::{
        activity_json::ActivityJson,
        balance_json::BalanceJson,
        status_json::{ErrorJson, StatusJson},
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsParams {
    address: Option<String>,
    start_block: Option<String>,
}

impl TransactionsParams {
    fn parse(&self) -> Result<(Address, u64), FetchError> {
        const MISSING: &str = "Address and startBlock are required";
        let address = required(self.address.as_deref(), MISSING)?;
        let start_block = required(self.start_block.as_deref(), MISSING)?;
        Ok((parse_address(address)?, parse_start_block(start_block)?))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceParams {
    address: Option<String>,
    date: Option<String>,
    contract_address: Option<String>,
}

impl BalanceParams {
    fn parse(&self) -> Result<BalanceQuery, FetchError> {
        const MISSING: &str = "Address and date are required";
        let address = required(self.address.as_deref(), MISSING)?;
        let date = required(self.date.as_deref(), MISSING)?;
        BalanceQuery::parse(address, date, self.contract_address.as_deref())
    }
}

pub async fn status() -> Json<StatusJson> {
    Json(StatusJson {
        status: "OK",
        message: "Server is running",
    })
}

pub async fn transactions(
    State(state): State<AppState>,
    params: Result<Query<TransactionsParams>, QueryRejection>,
) -> Response {
    const CONTEXT: &str = "Failed to fetch transactions";

    let (address, start_block) = match query_params(params).and_then(|p| p.parse()) {
        Ok(parsed) => parsed,
        Err(e) => return error_response(CONTEXT, e),
    };

    match fetch_account_activity(state.explorer.as_ref(), address, start_block, &state.settings)
        .await
    {
        Ok(activity) => Json(ActivityJson::from(activity)).into_response(),
        Err(e) => error_response(CONTEXT, e),
    }
}

pub async fn balance_at_date(
    State(state): State<AppState>,
    params: Result<Query<BalanceParams>, QueryRejection>,
) -> Response {
    const CONTEXT: &str = "Failed to fetch balance";

    let query = match query_params(params).and_then(|p| p.parse()) {
        Ok(query) => query,
        Err(e) => return error_response(CONTEXT, e),
    };

    match resolve_balance(state.explorer.as_ref(), &query).await {
        Ok(result) => Json(BalanceJson::from(result)).into_response(),
        Err(e) => error_response(CONTEXT, e),
    }
}

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, FetchError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| FetchError::InvalidQuery(rejection.body_text()))
}

fn error_response(context: &'static str, err: FetchError) -> Response {
    if err.is_validation() {
        warn!(%err, "Rejected request");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorJson {
                error: err.to_string(),
                details: None,
            }),
        )
            .into_response();
    }

    error!(%err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorJson {
            error: context.to_string(),
            details: Some(err.to_string()),
        }),
    )
        .into_response()
}
