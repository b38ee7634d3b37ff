use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{Value};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::fees::command::pay_fees_cmd::{PayFeesCommand, PayFeesCommandRequest, PayFeesCommandResponse};
use crate::fees::command::refund_fee_cmd::{RefundFeeCommand, RefundFeeCommandRequest, RefundFeeCommandResponse};
use crate::fees::command::verify_payment_cmd::{VerifyPaymentCommand, VerifyPaymentCommandRequest, VerifyPaymentCommandResponse};
use crate::fees::domain::FeeService;
use crate::fees::factory;
use crate::gateway::factory::create_payment_gateway;

fn build_service(state: &AppState) -> Box<dyn FeeService> {
    factory::create_fee_service(&state.config, &state.client, state.clock.clone(),
                                create_payment_gateway(state.clock.clone()))
}

pub async fn pay_late_fees(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<PayFeesCommandResponse>, ServerError> {
    let req: PayFeesCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = PayFeesCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub async fn refund_late_fee_payment(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<RefundFeeCommandResponse>, ServerError> {
    let req: RefundFeeCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = RefundFeeCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>) -> Result<Json<VerifyPaymentCommandResponse>, ServerError> {
    let req = VerifyPaymentCommandRequest { transaction_id };
    let res = VerifyPaymentCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}
