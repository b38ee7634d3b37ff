use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronStatusReport;

pub struct PatronReportCommand {
    patron_service: Box<dyn PatronService>,
}

impl PatronReportCommand {
    pub fn new(patron_service: Box<dyn PatronService>) -> Self {
        Self {
            patron_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PatronReportCommandRequest {
    pub patron_id: String,
}

impl PatronReportCommandRequest {
    pub fn new(patron_id: String) -> Self {
        Self {
            patron_id,
        }
    }
}

// a malformed patron id serializes as an empty object
#[derive(Debug, Serialize)]
pub struct PatronReportCommandResponse {
    #[serde(flatten)]
    pub report: Option<PatronStatusReport>,
}

impl PatronReportCommandResponse {
    pub fn new(report: Option<PatronStatusReport>) -> Self {
        Self {
            report,
        }
    }
}

#[async_trait]
impl Command<PatronReportCommandRequest, PatronReportCommandResponse> for PatronReportCommand {
    async fn execute(&self, req: PatronReportCommandRequest) -> Result<PatronReportCommandResponse, CommandError> {
        self.patron_service.get_patron_status_report(req.patron_id.as_str())
            .await.map_err(CommandError::from).map(PatronReportCommandResponse::new)
    }
}
