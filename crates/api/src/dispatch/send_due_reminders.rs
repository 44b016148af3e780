use crate::error::MedlyError;
use crate::shared::auth::protect_trigger_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use futures::future::{self, join_all};
use futures::stream::{self, StreamExt};
use medly_api_structs::run_dispatch::{APIResponse, ErrorResponse};
use medly_domain::{
    group_reminders_by_user, Destination, DispatchOutcome, DispatchReport, DispatchResult,
    LocalStamp, Medication, PushMessage, Reminder, ID,
};
use medly_infra::MedlyContext;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

pub async fn run_dispatch_controller(
    http_req: HttpRequest,
    ctx: web::Data<MedlyContext>,
) -> Result<HttpResponse, MedlyError> {
    protect_trigger_route(&http_req, &ctx)?;

    let usecase = SendDueRemindersUseCase {};

    match execute(usecase, &ctx).await {
        Ok(report) => Ok(HttpResponse::Ok().json(APIResponse::new(report))),
        Err(UseCaseError::StorageError(e)) => {
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new(e)))
        }
    }
}

/// Scans every registered destination for reminders due at that
/// destination's local minute and pushes one notification per match.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

struct SendDueRemindersConfig {
    /// How many destinations are processed concurrently
    max_concurrent_destinations: usize,
    /// Deadline for one run. Kept under the trigger cadence so overlapping
    /// runs stay the exception rather than the rule.
    run_timeout: Duration,
}

impl SendDueRemindersUseCase {
    fn get_config() -> SendDueRemindersConfig {
        SendDueRemindersConfig {
            max_concurrent_destinations: 10,
            run_timeout: Duration::from_secs(50),
        }
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    /// One of the two bulk sources could not be read; nothing was attempted
    StorageError(String),
}

/// The reminders one destination should receive this tick: the owner's
/// candidates filtered down to an exact local (date, time) match.
///
/// Two runs resolving the same instant over the same candidate snapshot plan
/// the same sends. That makes overlapping runs double-send when the
/// `notification_sent` update of the first has not landed yet, which is the
/// accepted at-least-once behavior of the engine.
fn due_for_destination(
    destination: &Destination,
    reminders_by_user: &HashMap<ID, Vec<Reminder>>,
    now: DateTime<Utc>,
) -> Vec<Reminder> {
    let user_id = match &destination.user_id {
        Some(id) => id,
        None => return Vec::new(),
    };
    let local_now = LocalStamp::resolve(now, destination.tz());

    reminders_by_user
        .get(user_id)
        .map(|reminders| {
            reminders
                .iter()
                .filter(|r| r.is_due_at(&local_now))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// One bulk lookup of the medications the planned sends point at. Display
/// fields degrade to defaults when a record is missing or the lookup fails,
/// so this never aborts the run.
async fn medication_lookup(
    planned: &[(Destination, Vec<Reminder>)],
    ctx: &MedlyContext,
) -> HashMap<ID, Medication> {
    let medication_ids = planned
        .iter()
        .flat_map(|(_, due)| due.iter().filter_map(|r| r.medication_id.clone()))
        .collect::<Vec<_>>();

    if medication_ids.is_empty() {
        return HashMap::new();
    }

    match ctx.repos.medications.find_many(&medication_ids).await {
        Ok(medications) => medications.into_iter().map(|m| (m.id.clone(), m)).collect(),
        Err(e) => {
            warn!("Medication lookup failed, sending with default display fields: {:?}", e);
            HashMap::new()
        }
    }
}

async fn dispatch_to_destination(
    destination: Destination,
    due: Vec<Reminder>,
    medication_lookup: &HashMap<ID, Medication>,
    results: &Arc<Mutex<Vec<DispatchResult>>>,
    ctx: &MedlyContext,
) {
    let user_id = match destination.user_id.clone() {
        Some(id) => id,
        None => return,
    };

    let sends = due.into_iter().map(|reminder| {
        let user_id = user_id.clone();
        let token = destination.token.clone();
        async move {
            let medication = reminder
                .medication_id
                .as_ref()
                .and_then(|id| medication_lookup.get(id));
            let message = PushMessage::for_reminder(&reminder, medication);

            let outcome = match ctx.push.send(&token, &message).await {
                Ok(response) => DispatchOutcome::Sent {
                    status_code: response.status_code,
                    response: response.body,
                },
                Err(e) => DispatchOutcome::Failed {
                    error: e.to_string(),
                },
            };

            if outcome.is_accepted() {
                // Best-effort guard against re-sending on the next tick
                if let Err(e) = ctx.repos.reminders.mark_notified(&reminder.id).await {
                    warn!("Failed to mark reminder {} as notified: {:?}", reminder.id, e);
                }
            }

            results.lock().unwrap().push(DispatchResult {
                to: token,
                user_id,
                reminder_id: reminder.id,
                outcome,
            });
        }
    });

    join_all(sends).await;
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DispatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    /// This will run every minute
    async fn execute(&mut self, ctx: &MedlyContext) -> Result<Self::Response, Self::Error> {
        let config = Self::get_config();

        let (destinations, candidates) = future::try_join(
            ctx.repos.destinations.find_all(),
            ctx.repos.reminders.find_eligible(),
        )
        .await
        .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        let now = ctx.sys.get_utc_now();
        let reminders_by_user = group_reminders_by_user(candidates);

        let mut planned = Vec::new();
        for destination in destinations {
            if !destination.is_routable() {
                warn!(
                    "Skipping destination {} without owner or push address",
                    destination.id
                );
                continue;
            }
            let due = due_for_destination(&destination, &reminders_by_user, now);
            if !due.is_empty() {
                planned.push((destination, due));
            }
        }

        let medications = medication_lookup(&planned, ctx).await;

        let results = Arc::new(Mutex::new(Vec::new()));
        let fan_out = stream::iter(planned.into_iter().map(|(destination, due)| {
            let results = results.clone();
            let medications = &medications;
            async move {
                dispatch_to_destination(destination, due, medications, &results, ctx).await;
            }
        }))
        .buffer_unordered(config.max_concurrent_destinations)
        .collect::<Vec<_>>();

        let completed = actix_web::rt::time::timeout(config.run_timeout, fan_out)
            .await
            .is_ok();
        if !completed {
            warn!("Dispatch run hit its deadline, reporting partial results");
        }

        let results = results.lock().unwrap().clone();
        info!(
            "Dispatch run attempted {} sends (completed: {})",
            results.len(),
            completed
        );

        Ok(DispatchReport { results, completed })
    }
}
