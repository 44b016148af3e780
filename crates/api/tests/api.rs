use actix_web::{http, test, App};
use chrono::{DateTime, Utc};
use medly_api::configure_server_api;
use medly_api_structs::{add_medication, register_destination, run_dispatch};
use medly_domain::{Destination, Reminder};
use medly_infra::{setup_context_inmemory, ISys, MedlyContext};
use std::sync::Arc;

struct StaticTimeSys(DateTime<Utc>);
impl ISys for StaticTimeSys {
    fn get_utc_now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn setup_ctx(now: &str) -> MedlyContext {
    let mut ctx = setup_context_inmemory();
    ctx.sys = Arc::new(StaticTimeSys(now.parse().expect("Valid timestamp")));
    ctx
}

fn reminder_factory(user_id: &str, date: &str, time: &str) -> Reminder {
    Reminder {
        id: Default::default(),
        user_id: user_id.parse().expect("Valid ID"),
        medication_id: None,
        medicine_name: "Aspirin".into(),
        description: String::new(),
        date: date.into(),
        time: time.into(),
        taken: false,
        snoozed: false,
        notification_sent: false,
        repeat_schedule: false,
        total_reminders_left: 0,
    }
}

#[actix_web::test]
async fn test_status_ok() {
    let ctx = setup_ctx("2024-07-03T08:00:00Z");
    let mut app = test::init_service(
        App::new()
            .data(ctx)
            .configure(|cfg| configure_server_api(cfg)),
    )
    .await;

    let req = test::TestRequest::with_uri("/").to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);
}

#[actix_web::test]
async fn dispatch_trigger_requires_the_secret() {
    let ctx = setup_ctx("2024-07-03T08:00:00Z");
    let mut app = test::init_service(
        App::new()
            .data(ctx)
            .configure(|cfg| configure_server_api(cfg)),
    )
    .await;

    let req = test::TestRequest::post().uri("/dispatch/run").to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/dispatch/run")
        .insert_header(("medly-trigger-key", "not-the-secret"))
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn dispatch_trigger_reports_the_run() {
    // 12:00 UTC is 08:00 in New York during daylight saving time
    let ctx = setup_ctx("2024-07-03T12:00:00Z");
    let trigger_secret = ctx.config.trigger_secret.clone();

    ctx.repos
        .destinations
        .insert(&Destination::new(
            "u1".parse().expect("Valid ID"),
            "tok1".into(),
            "America/New_York".into(),
        ))
        .await
        .unwrap();
    let due = reminder_factory("u1", "2024-07-03", "08:00");
    ctx.repos.reminders.insert(&due).await.unwrap();
    ctx.repos
        .reminders
        .insert(&reminder_factory("u1", "2024-07-03", "09:00"))
        .await
        .unwrap();

    let mut app = test::init_service(
        App::new()
            .data(ctx)
            .configure(|cfg| configure_server_api(cfg)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/dispatch/run")
        .insert_header(("medly-trigger-key", trigger_secret))
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);

    let body: run_dispatch::APIResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert!(body.completed);
    assert_eq!(body.total_sent, 1);
    assert_eq!(body.results[0].reminder_id, due.id);
}

#[actix_web::test]
async fn destination_registration_upserts() {
    let ctx = setup_ctx("2024-07-03T08:00:00Z");
    let repos = ctx.repos.clone();

    let mut app = test::init_service(
        App::new()
            .data(ctx)
            .configure(|cfg| configure_server_api(cfg)),
    )
    .await;

    for token in ["tok1", "tok2"].iter() {
        let req = test::TestRequest::post()
            .uri("/destinations")
            .set_json(&register_destination::RequestBody {
                user_id: "u1".parse().expect("Valid ID"),
                token: (*token).into(),
                timezone: Some("Europe/Oslo".into()),
            })
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    let all = repos.destinations.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].token, "tok2");
}

#[actix_web::test]
async fn adding_a_medication_schedules_its_reminders() {
    let ctx = setup_ctx("2024-07-03T08:00:00Z");
    let repos = ctx.repos.clone();

    let mut app = test::init_service(
        App::new()
            .data(ctx)
            .configure(|cfg| configure_server_api(cfg)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/medications")
        .set_json(&add_medication::RequestBody {
            user_id: "u1".parse().expect("Valid ID"),
            medicine_name: "Aspirin".into(),
            medicine_type: "Tablet".into(),
            quantity: "2".into(),
            frequency: "Twice a day".into(),
            notes: None,
            times: vec!["08:00".into(), "20:00".into()],
            date: "2024-07-03".into(),
            repeat_count: None,
        })
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::CREATED);

    let eligible = repos.reminders.find_eligible().await.unwrap();
    assert_eq!(eligible.len(), 2);
}

#[actix_web::test]
async fn taking_a_reminder_is_terminal_for_dispatch() {
    let ctx = setup_ctx("2024-07-03T08:00:00Z");
    let repos = ctx.repos.clone();

    let reminder = reminder_factory("u1", "2024-07-03", "08:00");
    repos.reminders.insert(&reminder).await.unwrap();

    let mut app = test::init_service(
        App::new()
            .data(ctx)
            .configure(|cfg| configure_server_api(cfg)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/reminders/{}/taken", reminder.id))
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);

    let stored = repos.reminders.find(&reminder.id).await.unwrap();
    assert!(stored.taken);
    assert!(repos.reminders.find_eligible().await.unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/reminders/does-not-exist/taken")
        .to_request();
    let resp = test::call_service(&mut app, req).await;
    assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
}
