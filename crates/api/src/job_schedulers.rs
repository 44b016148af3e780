use crate::dispatch::SendDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use medly_infra::MedlyContext;
use std::time::Duration;
use tracing::{error, info};

/// Seconds until the next minute boundary, offset by `secs_before_min`, so
/// dispatch ticks line up with the minute reminders are stored at.
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

pub fn start_send_reminders_job(ctx: MedlyContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_utc_now().timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_due_reminders(context));
        }
    });
}

async fn send_due_reminders(context: MedlyContext) {
    let usecase = SendDueRemindersUseCase {};
    match execute(usecase, &context).await {
        Ok(report) => info!(
            "Dispatch tick attempted {} sends (completed: {})",
            report.total_sent(),
            report.completed
        ),
        Err(e) => error!("Dispatch tick failed: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
