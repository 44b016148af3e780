use crate::error::MedlyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use medly_api_structs::update_reminder_time::{APIResponse, PathParams, RequestBody};
use medly_domain::{is_valid_time, Reminder, ID};
use medly_infra::MedlyContext;

pub async fn update_reminder_time_controller(
    ctx: web::Data<MedlyContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MedlyError> {
    let reminder_id = path.reminder_id.parse().map_err(|_| {
        MedlyError::BadClientData(format!("Invalid reminder id: {}", path.reminder_id))
    })?;

    let usecase = UpdateReminderTimeUseCase {
        reminder_id,
        time: body.time.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(MedlyError::from)
}

/// Moves a reminder to a new local clock time (the edit flow of the app).
#[derive(Debug)]
pub struct UpdateReminderTimeUseCase {
    pub reminder_id: ID,
    pub time: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTime(String),
    StorageError,
}

impl From<UseCaseError> for MedlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {} was not found.",
                reminder_id
            )),
            UseCaseError::InvalidTime(time) => Self::BadClientData(format!(
                "Invalid time provided: {}, expected a zero padded HH:MM value",
                time
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderTimeUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminderTime";

    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        if is_valid_time(&self.time).is_err() {
            return Err(UseCaseError::InvalidTime(self.time.clone()));
        }

        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder.time = self.time.clone();

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
