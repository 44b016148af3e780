use crate::error::MedlyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use medly_api_structs::mark_reminder_taken::{APIResponse, PathParams};
use medly_domain::{Reminder, ID};
use medly_infra::MedlyContext;

pub async fn mark_reminder_taken_controller(
    ctx: web::Data<MedlyContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, MedlyError> {
    let reminder_id = path.reminder_id.parse().map_err(|_| {
        MedlyError::BadClientData(format!("Invalid reminder id: {}", path.reminder_id))
    })?;

    let usecase = MarkReminderTakenUseCase { reminder_id };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(MedlyError::from)
}

/// Terminal lifecycle transition, applied when the user confirms the dose
/// from the notification. Completing the occurrence also counts down a
/// recurring series.
#[derive(Debug)]
pub struct MarkReminderTakenUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for MedlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {} was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkReminderTakenUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkReminderTaken";

    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder.mark_taken();

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
