//! Integration tests for the workspace session against a mock backend

mod common;

use fitness_coach_client::{render, repl, session::Session};
use fitness_coach_shared::view::{Body, OverlayContent};
use fitness_coach_shared::{Event, ItemKind, Profile, ProfileField, Section, Severity, ViewMode};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_plan(app: &common::TestApp, plan: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan))
        .mount(&app.server)
        .await;
}

fn fill_profile(session: &mut Session, profile: &Profile) {
    for field in ProfileField::FORM_ORDER {
        session.apply(Event::EditField {
            field,
            value: profile.get(field).to_string(),
        });
    }
}

async fn planned_session(app: &common::TestApp) -> Session {
    mount_plan(app, common::squat_plan()).await;
    let mut session = app.session();
    fill_profile(&mut session, &common::ana());
    session.apply(Event::Submit);
    session.settle().await;
    assert_eq!(session.workspace().mode(), ViewMode::PlanView);
    session.take_notices();
    session
}

#[tokio::test]
async fn test_submit_shows_plan() {
    let app = common::TestApp::new().await;
    mount_plan(&app, common::squat_plan()).await;

    let mut session = app.session();
    fill_profile(&mut session, &common::ana());
    session.apply(Event::Submit);
    assert!(session.workspace().is_generating());

    session.settle().await;

    assert_eq!(session.workspace().mode(), ViewMode::PlanView);
    assert!(!session.workspace().is_generating());
    let text = render::screen(&session.screen());
    assert!(text.contains("Day 1"));
    assert!(text.contains("Squat"));
    assert!(text.contains("3 sets × 10 reps | Rest: 60s"));
    assert!(text.contains("350 cal | 12g protein"));
}

#[tokio::test]
async fn test_failed_submit_keeps_form() {
    let app = common::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let mut session = app.session();
    fill_profile(&mut session, &common::random_profile());
    session.apply(Event::Submit);
    session.settle().await;

    assert_eq!(session.workspace().mode(), ViewMode::Form);
    assert!(!session.workspace().is_generating());
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].notification.severity, Severity::Alert);
    assert_eq!(notices[0].notification.message, "Failed to generate plan");
}

#[tokio::test]
async fn test_blank_required_field_sends_nothing() {
    let app = common::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::squat_plan()))
        .expect(0)
        .mount(&app.server)
        .await;

    let mut session = app.session();
    session.apply(Event::Submit);

    assert!(!session.is_busy());
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].notification.message.contains("Name"));
}

#[tokio::test]
async fn test_regenerate_replaces_plan() {
    let app = common::TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::squat_plan()))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    mount_plan(
        &app,
        json!({ "workoutPlan": [{ "day": "Day 1", "exercises": [{ "name": "Deadlift" }] }] }),
    )
    .await;

    let mut session = app.session();
    fill_profile(&mut session, &common::ana());
    session.apply(Event::Submit);
    session.settle().await;

    session.apply(Event::Regenerate);
    assert_eq!(session.workspace().mode(), ViewMode::Form);
    session.settle().await;

    let text = render::screen(&session.screen());
    assert!(text.contains("Deadlift"));
    assert!(!text.contains("Squat"));
}

#[tokio::test]
async fn test_latest_image_selection_wins() {
    let app = common::TestApp::new().await;
    let mut session = planned_session(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/generate-image"))
        .and(body_partial_json(json!({ "itemName": "Squat" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "image": "squat.png" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate-image"))
        .and(body_partial_json(json!({ "itemName": "Oats", "type": "food" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "image": "oats.png" })))
        .mount(&app.server)
        .await;

    session.apply(Event::SelectItem {
        item_name: "Squat".to_string(),
        kind: ItemKind::Exercise,
    });
    session.apply(Event::SelectItem {
        item_name: "Oats".to_string(),
        kind: ItemKind::Food,
    });
    session.settle().await;

    let overlay = session.screen().overlay.unwrap();
    assert_eq!(overlay.title, "Oats");
    assert_eq!(overlay.content, OverlayContent::Image("oats.png".to_string()));
}

#[tokio::test]
async fn test_dismissed_overlay_stays_closed() {
    let app = common::TestApp::new().await;
    let mut session = planned_session(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/generate-image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "image": "squat.png" }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&app.server)
        .await;

    session.apply(Event::SelectItem {
        item_name: "Squat".to_string(),
        kind: ItemKind::Exercise,
    });
    assert!(session.screen().overlay.is_some());
    session.apply(Event::DismissOverlay);
    session.settle().await;

    assert!(session.screen().overlay.is_none());
    assert!(session.take_notices().is_empty());
}

#[tokio::test]
async fn test_export_saves_document() {
    let app = common::TestApp::new().await;
    let mut session = planned_session(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/export-pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 plan".to_vec()))
        .expect(1)
        .mount(&app.server)
        .await;

    session.apply(Event::Export);
    assert!(session.workspace().is_exporting());
    session.settle().await;

    assert!(!session.workspace().is_exporting());
    let saved = std::fs::read(app.downloads.path().join("fitness-plan.pdf")).unwrap();
    assert_eq!(saved, b"%PDF-1.4 plan");
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].notification.message.starts_with("Plan saved to"));
}

#[tokio::test]
async fn test_failed_export_alerts() {
    let app = common::TestApp::new().await;
    let mut session = planned_session(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/export-pdf"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&app.server)
        .await;

    session.apply(Event::Export);
    session.settle().await;

    assert!(!app.downloads.path().join("fitness-plan.pdf").exists());
    let notices = session.take_notices();
    assert_eq!(notices[0].notification.message, "Failed to export PDF");
}

#[tokio::test]
async fn test_motivation_failure_is_silent() {
    let app = common::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/motivation"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let mut session = app.session();
    session.apply(Event::LoadMotivation);
    session.settle().await;

    assert!(session.workspace().motivation.is_none());
    assert!(session.take_notices().is_empty());
}

#[tokio::test]
async fn test_read_aloud_plays_speech() {
    let app = common::TestApp::new().await;
    let mut session = planned_session(&app).await;

    Mock::given(method("POST"))
        .and(path("/api/text-to-speech"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&app.server)
        .await;

    session.apply(Event::ReadAloud {
        section: Section::Workout,
    });
    assert_eq!(session.workspace().reading_section(), Some(Section::Workout));
    session.settle().await;

    assert!(!session.workspace().is_reading());
    assert_eq!(app.player.clips(), vec![vec![1, 2, 3]]);
}

#[tokio::test]
async fn test_back_discards_plan() {
    let app = common::TestApp::new().await;
    let mut session = planned_session(&app).await;

    session.apply(Event::Back);

    assert!(session.workspace().plan.is_none());
    assert!(matches!(session.screen().body, Body::Form(_)));
    assert_eq!(session.workspace().profile.name, "Ana");
}

#[tokio::test]
async fn test_terminal_session_end_to_end() {
    let app = common::TestApp::new().await;
    mount_plan(&app, common::squat_plan()).await;
    Mock::given(method("GET"))
        .and(path("/api/motivation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "quote": "Show up" })))
        .mount(&app.server)
        .await;

    let input = "set name Ana\nset age 30\nset gender female\nset height 165\nset weight 60\n\
                 set goal muscle-gain\nset fitnessLevel intermediate\nsubmit\n";
    let mut output = Vec::new();
    let mut session = app.session();

    repl::run(
        &mut session,
        input.as_bytes(),
        &mut output,
        std::future::pending::<()>(),
    )
    .await
    .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("💪 AI Fitness Coach"));
    assert!(text.contains("3 sets × 10 reps | Rest: 60s"));
    assert_eq!(session.workspace().profile.fitness_level, "intermediate");
    assert_eq!(session.workspace().motivation.as_deref(), Some("Show up"));
}

#[tokio::test]
async fn test_terminal_reports_bad_commands() {
    let app = common::TestApp::new().await;
    let mut output = Vec::new();
    let mut session = app.session();

    repl::run(
        &mut session,
        "set gender robot\nexport\nquit\n".as_bytes(),
        &mut output,
        std::future::pending::<()>(),
    )
    .await
    .unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Gender must be one of"));
    assert!(text.contains("There is no plan on screen"));
    assert_eq!(session.workspace().profile.gender, "male");
}

#[tokio::test]
async fn test_terminal_survives_unreadable_line() {
    let app = common::TestApp::new().await;
    let mut output = Vec::new();
    let mut session = app.session();

    let input: &[u8] = b"set name \xff\xfe\nset name Ana\nquit\n";
    repl::run(&mut session, input, &mut output, std::future::pending::<()>())
        .await
        .unwrap();

    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("Could not read that line"));
    assert_eq!(session.workspace().profile.name, "Ana");
}
