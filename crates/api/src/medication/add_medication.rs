use crate::error::MedlyError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use medly_api_structs::add_medication::{APIResponse, RequestBody};
use medly_domain::{is_valid_date, is_valid_time, Medication, Reminder, ID};
use medly_infra::MedlyContext;

pub async fn add_medication_controller(
    ctx: web::Data<MedlyContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MedlyError> {
    let body = body.into_inner();

    let usecase = AddMedicationUseCase {
        user_id: body.user_id,
        medicine_name: body.medicine_name,
        medicine_type: body.medicine_type,
        quantity: body.quantity,
        frequency: body.frequency,
        notes: body.notes.unwrap_or_default(),
        times: body.times,
        date: body.date,
        repeat_count: body.repeat_count,
    };

    execute(usecase, &ctx)
        .await
        .map(|(medication, reminders)| HttpResponse::Created().json(APIResponse::new(medication, reminders)))
        .map_err(MedlyError::from)
}

/// The medication entry flow: stores the medication and schedules one
/// reminder per time of day. A positive `repeat_count` turns each reminder
/// into a recurring series with that many occurrences.
#[derive(Debug)]
pub struct AddMedicationUseCase {
    pub user_id: ID,
    pub medicine_name: String,
    pub medicine_type: String,
    pub quantity: String,
    pub frequency: String,
    pub notes: String,
    pub times: Vec<String>,
    pub date: String,
    pub repeat_count: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyMedicineName,
    InvalidDate(String),
    InvalidTime(String),
    NoTimes,
    InvalidRepeatCount(i64),
    StorageError,
}

impl From<UseCaseError> for MedlyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMedicineName => {
                Self::BadClientData("A medicine name is required".into())
            }
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date provided: {}, expected a zero padded YYYY-MM-DD value",
                date
            )),
            UseCaseError::InvalidTime(time) => Self::BadClientData(format!(
                "Invalid time provided: {}, expected a zero padded HH:MM value",
                time
            )),
            UseCaseError::NoTimes => {
                Self::BadClientData("At least one reminder time is required".into())
            }
            UseCaseError::InvalidRepeatCount(count) => Self::BadClientData(format!(
                "Invalid repeat count provided: {}, expected a positive number",
                count
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddMedicationUseCase {
    type Response = (Medication, Vec<Reminder>);

    type Error = UseCaseError;

    const NAME: &'static str = "AddMedication";

    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        if self.medicine_name.trim().is_empty() {
            return Err(UseCaseError::EmptyMedicineName);
        }
        if is_valid_date(&self.date).is_err() {
            return Err(UseCaseError::InvalidDate(self.date.clone()));
        }
        if self.times.is_empty() {
            return Err(UseCaseError::NoTimes);
        }
        for time in &self.times {
            if is_valid_time(time).is_err() {
                return Err(UseCaseError::InvalidTime(time.clone()));
            }
        }
        if let Some(count) = self.repeat_count {
            if count <= 0 {
                return Err(UseCaseError::InvalidRepeatCount(count));
            }
        }

        let medication = Medication {
            id: Default::default(),
            user_id: self.user_id.clone(),
            name: self.medicine_name.clone(),
            kind: self.medicine_type.clone(),
            quantity: self.quantity.clone(),
            frequency: self.frequency.clone(),
            notes: self.notes.clone(),
        };
        ctx.repos
            .medications
            .insert(&medication)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut reminders = Vec::with_capacity(self.times.len());
        for time in &self.times {
            let reminder = Reminder {
                id: Default::default(),
                user_id: self.user_id.clone(),
                medication_id: Some(medication.id.clone()),
                medicine_name: self.medicine_name.clone(),
                description: self.notes.clone(),
                date: self.date.clone(),
                time: time.clone(),
                taken: false,
                snoozed: false,
                notification_sent: false,
                repeat_schedule: self.repeat_count.is_some(),
                total_reminders_left: self.repeat_count.unwrap_or(0),
            };
            ctx.repos
                .reminders
                .insert(&reminder)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            reminders.push(reminder);
        }

        Ok((medication, reminders))
    }
}
