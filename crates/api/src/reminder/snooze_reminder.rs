use crate::error::MedlyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use medly_api_structs::snooze_reminder::{APIResponse, PathParams};
use medly_domain::{Reminder, ID, SNOOZE_DELAY_MINUTES};
use medly_infra::MedlyContext;

pub async fn snooze_reminder_controller(
    ctx: web::Data<MedlyContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, MedlyError> {
    let reminder_id = path.reminder_id.parse().map_err(|_| {
        MedlyError::BadClientData(format!("Invalid reminder id: {}", path.reminder_id))
    })?;

    let usecase = SnoozeReminderUseCase { reminder_id };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(MedlyError::from)
}

/// Pushes a reminder five minutes forward and reopens it for sending, so the
/// next matching tick notifies again.
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    /// The stored clock time is not a valid `HH:MM` value
    CorruptReminderTime(String),
    StorageError,
}

impl From<UseCaseError> for MedlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {} was not found.",
                reminder_id
            )),
            UseCaseError::CorruptReminderTime(_) => Self::InternalError,
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        reminder
            .snooze(SNOOZE_DELAY_MINUTES)
            .map_err(|_| UseCaseError::CorruptReminderTime(reminder.time.clone()))?;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
