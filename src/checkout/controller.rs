use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{Value};
use crate::checkout::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::checkout::command::late_fee_cmd::{LateFeeCommand, LateFeeCommandRequest, LateFeeCommandResponse};
use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::checkout::domain::CheckoutService;
use crate::checkout::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

fn build_service(state: &AppState) -> Box<dyn CheckoutService> {
    factory::create_checkout_service(&state.config, &state.client, state.clock.clone())
}

pub async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = BorrowBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub async fn return_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ReturnBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub async fn late_fee(
    State(state): State<AppState>,
    Path((patron_id, book_id)): Path<(String, String)>) -> Result<Json<LateFeeCommandResponse>, ServerError> {
    let req = LateFeeCommandRequest { patron_id, book_id };
    let res = LateFeeCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}
