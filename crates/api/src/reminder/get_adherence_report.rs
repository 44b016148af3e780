use crate::error::MedlyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use medly_api_structs::get_adherence_report::{APIResponse, PathParams, QueryParams};
use medly_domain::{is_valid_date, Reminder, ID};
use medly_infra::MedlyContext;

pub async fn get_adherence_report_controller(
    ctx: web::Data<MedlyContext>,
    path: web::Path<PathParams>,
    query: web::Query<QueryParams>,
) -> Result<HttpResponse, MedlyError> {
    let user_id = path
        .user_id
        .parse()
        .map_err(|_| MedlyError::BadClientData(format!("Invalid user id: {}", path.user_id)))?;

    let usecase = GetAdherenceReportUseCase {
        user_id,
        from: query.from.clone(),
        to: query.to.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(MedlyError::from)
}

/// Historical adherence over a date range: reminders are retained after
/// dispatch exactly so this report can tell taken from missed doses.
#[derive(Debug)]
pub struct GetAdherenceReportUseCase {
    pub user_id: ID,
    pub from: String,
    pub to: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDateRange(String, String),
    StorageError,
}

impl From<UseCaseError> for MedlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDateRange(from, to) => Self::BadClientData(format!(
                "Invalid date range provided: {} .. {}, expected zero padded YYYY-MM-DD values",
                from, to
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAdherenceReportUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAdherenceReport";

    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        if is_valid_date(&self.from).is_err()
            || is_valid_date(&self.to).is_err()
            || self.from > self.to
        {
            return Err(UseCaseError::InvalidDateRange(
                self.from.clone(),
                self.to.clone(),
            ));
        }

        ctx.repos
            .reminders
            .find_by_user_in_range(&self.user_id, &self.from, &self.to)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
