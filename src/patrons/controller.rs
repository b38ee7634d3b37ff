use axum::{
    extract::{Path, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::patrons::command::patron_report_cmd::{PatronReportCommand, PatronReportCommandRequest, PatronReportCommandResponse};
use crate::patrons::domain::PatronService;
use crate::patrons::factory;

fn build_service(state: &AppState) -> Box<dyn PatronService> {
    factory::create_patron_service(&state.config, &state.client, state.clock.clone())
}

pub async fn patron_status_report(
    State(state): State<AppState>,
    Path(patron_id): Path<String>) -> Result<Json<PatronReportCommandResponse>, ServerError> {
    let req = PatronReportCommandRequest { patron_id };
    let res = PatronReportCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}
