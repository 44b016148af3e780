use crate::error::MedlyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono_tz::Tz;
use medly_api_structs::register_destination::{APIResponse, RequestBody};
use medly_domain::{Destination, ID};
use medly_infra::MedlyContext;
use tracing::warn;

pub async fn register_destination_controller(
    ctx: web::Data<MedlyContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MedlyError> {
    let body = body.into_inner();

    let usecase = RegisterDestinationUseCase {
        user_id: body.user_id,
        token: body.token,
        timezone: body.timezone.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|destination| HttpResponse::Ok().json(APIResponse::new(destination)))
        .map_err(MedlyError::from)
}

/// Registers (or refreshes) a user's push destination. One row per user:
/// a second registration updates the row in place instead of duplicating it.
#[derive(Debug)]
pub struct RegisterDestinationUseCase {
    pub user_id: ID,
    pub token: String,
    pub timezone: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyToken,
    StorageError,
}

impl From<UseCaseError> for MedlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyToken => {
                Self::BadClientData("A push token is required".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterDestinationUseCase {
    type Response = Destination;

    type Error = UseCaseError;

    const NAME: &'static str = "RegisterDestination";

    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        if self.token.is_empty() {
            return Err(UseCaseError::EmptyToken);
        }
        // Stored as given; the dispatch loop falls back to UTC for zones it
        // cannot resolve
        if !self.timezone.is_empty() && self.timezone.parse::<Tz>().is_err() {
            warn!(
                "User {} registered unknown timezone {}, dispatch will treat it as UTC",
                self.user_id, self.timezone
            );
        }

        let destination = match ctx.repos.destinations.find_by_user(&self.user_id).await {
            Some(mut destination) => {
                destination.token = self.token.clone();
                destination.timezone = self.timezone.clone();
                ctx.repos
                    .destinations
                    .save(&destination)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                destination
            }
            None => {
                let destination = Destination::new(
                    self.user_id.clone(),
                    self.token.clone(),
                    self.timezone.clone(),
                );
                ctx.repos
                    .destinations
                    .insert(&destination)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                destination
            }
        };

        Ok(destination)
    }
}
