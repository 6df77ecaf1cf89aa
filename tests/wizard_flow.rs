//! End-to-end wizard runs against a mocked test-management API.

use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;
use test_wizard::api::{CorrectOption, Difficulty};
use test_wizard::wizard::{
    BasicDetailsForm, EntryOutcome, QuestionForm, StepOutcome, SubmitAction,
};
use test_wizard::{ApiClient, ApiConfig, Route, WizardController, WizardError, WizardStep, WizardStore};

// ============================================================================
// TEST HELPERS
// ============================================================================

fn wizard_for(server: &MockServer) -> WizardController<ApiClient> {
    let config = ApiConfig {
        base_url: server.base_url(),
        token: Some("tok".to_string()),
        ..ApiConfig::default()
    };
    WizardController::new(Arc::new(ApiClient::new(&config).unwrap()))
}

async fn mock_catalogs(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/subjects");
            then.status(200).json_body(json!({
                "status": "success",
                "data": [{"id": "s1", "name": "Algebra"}]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/topics/subject/s1");
            then.status(200).json_body(json!({
                "status": "success",
                "data": [{"id": "t1", "name": "Linear Equations", "subject_id": "s1"}]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/sub-topics/topic/t1");
            then.status(200).json_body(json!({
                "status": "success",
                "data": [{"id": "st1", "name": "Slope", "topic_id": "t1"}]
            }));
        })
        .await;
}

fn question(text: &str) -> QuestionForm {
    QuestionForm {
        question: text.to_string(),
        option1: "1".to_string(),
        option2: "2".to_string(),
        option3: "3".to_string(),
        option4: "4".to_string(),
        correct_option: Some(CorrectOption::Option3),
        ..QuestionForm::default()
    }
}

// ============================================================================
// CREATE
// ============================================================================

#[tokio::test]
async fn test_algebra_test_from_create_to_publish() {
    let server = MockServer::start_async().await;
    mock_catalogs(&server).await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/tests")
                .header("authorization", "Bearer tok")
                .json_body_partial(
                    r#"{"name": "Algebra 1", "subject": "s1", "topics": ["t1"], "sub_topics": ["st1"], "total_questions": 2, "correct_marks": 5, "total_marks": 10, "status": "draft"}"#,
                );
            then.status(201).json_body(json!({
                "status": "success",
                "data": {"id": "T1", "name": "Algebra 1", "total_questions": 2}
            }));
        })
        .await;
    let bulk = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/questions/bulk")
                .json_body_partial(r#"{"questions": [{"test_id": "T1", "type": "mcq", "subject": "s1"}]}"#);
            then.status(200).json_body(json!({"status": "success"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tests/T1");
            then.status(200).json_body(json!({
                "status": "success",
                "data": {
                    "id": "T1",
                    "name": "Algebra 1",
                    "type": "chapterwise",
                    "subject": "Algebra",
                    "topics": ["Linear Equations"],
                    "sub_topics": ["Slope"],
                    "total_questions": 2,
                    "total_marks": 10
                }
            }));
        })
        .await;
    let publish = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/tests/T1")
                .json_body(json!({"status": "live"}));
            then.status(200).json_body(json!({"status": "success"}));
        })
        .await;

    let mut wizard = wizard_for(&server);
    assert_eq!(wizard.enter(&Route::CreateTest).await.unwrap(), EntryOutcome::Fresh);

    let mut form = wizard.prefill_form().await.unwrap();
    form.name = "Algebra 1".to_string();
    wizard.select_subject(&mut form, "s1").await.unwrap();
    assert_eq!(wizard.catalogs().topics()[0].name, "Linear Equations");
    wizard
        .select_topics(&mut form, vec!["t1".to_string()])
        .await
        .unwrap();
    assert_eq!(wizard.catalogs().sub_topics()[0].id, "st1");
    form.sub_topics = vec!["st1".to_string()];
    form.difficulty = Some(Difficulty::Easy);
    form.total_questions = 2;
    assert_eq!(form.total_marks(), 10);

    assert_eq!(
        wizard.submit_basic(&form).await.unwrap(),
        StepOutcome::Moved(WizardStep::Questions)
    );
    create.assert_async().await;
    assert_eq!(wizard.store().test_id(), Some("T1"));
    assert_eq!(wizard.store().no_of_questions(), Some(2));

    assert_eq!(
        wizard
            .submit_question(&question("2x = 4"), SubmitAction::Next)
            .await
            .unwrap(),
        StepOutcome::Stay
    );
    assert_eq!(
        wizard
            .submit_question(&question("3x = 9"), SubmitAction::Publish)
            .await
            .unwrap(),
        StepOutcome::Moved(WizardStep::Confirm)
    );
    assert_eq!(bulk.hits_async().await, 2);

    let summary = wizard.confirm_summary().await.unwrap();
    assert_eq!(summary.subject.as_deref(), Some("Algebra"));
    assert_eq!(summary.total_marks, 10);

    wizard.confirm().unwrap();
    assert_eq!(
        wizard.publish().await.unwrap(),
        StepOutcome::Navigate(Route::Dashboard)
    );
    publish.assert_async().await;
    assert_eq!(wizard.store(), &WizardStore::default());
}

#[tokio::test]
async fn test_single_question_skips_to_confirm() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/tests");
            then.status(201).json_body(json!({
                "status": "success",
                "data": {"id": "T7", "total_questions": 1}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/questions/bulk");
            then.status(200).json_body(json!({"status": "success"}));
        })
        .await;

    let mut wizard = wizard_for(&server);
    wizard.enter(&Route::CreateTest).await.unwrap();
    let form = BasicDetailsForm {
        name: "Quick".to_string(),
        subject: "s1".to_string(),
        topics: vec!["t1".to_string()],
        difficulty: Some(Difficulty::Medium),
        total_questions: 1,
        ..BasicDetailsForm::default()
    };
    wizard.submit_basic(&form).await.unwrap();
    assert!(wizard.authoring().unwrap().publish_enabled());

    let outcome = wizard
        .submit_question(&question("only"), SubmitAction::Next)
        .await
        .unwrap();

    assert_eq!(outcome, StepOutcome::Moved(WizardStep::Confirm));
    assert_eq!(wizard.store().questions().len(), 1);
}

#[tokio::test]
async fn test_create_failure_stays_on_basic() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/tests");
            then.status(500).body("database unavailable");
        })
        .await;

    let mut wizard = wizard_for(&server);
    wizard.enter(&Route::CreateTest).await.unwrap();
    let form = BasicDetailsForm {
        name: "Broken".to_string(),
        subject: "s1".to_string(),
        topics: vec!["t1".to_string()],
        difficulty: Some(Difficulty::Easy),
        total_questions: 3,
        ..BasicDetailsForm::default()
    };

    let err = wizard.submit_basic(&form).await.unwrap_err();

    assert!(matches!(err, WizardError::Api(_)));
    assert_eq!(wizard.current_step(), WizardStep::Basic);
    assert_eq!(wizard.store().test_id(), None);
}

// ============================================================================
// EDIT / VIEW
// ============================================================================

#[tokio::test]
async fn test_edit_prefill_resolves_names() {
    let server = MockServer::start_async().await;
    mock_catalogs(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tests/T1");
            then.status(200).json_body(json!({
                "status": "success",
                "data": {
                    "id": "T1",
                    "name": "Algebra 1",
                    "subject": "Algebra",
                    "topics": ["Linear Equations"],
                    "sub_topics": ["Slope"],
                    "difficulty": "medium",
                    "correct_marks": 4,
                    "wrong_marks": -1,
                    "unattempt_marks": 0,
                    "total_time": 60,
                    "total_questions": 5,
                    "total_marks": 20
                }
            }));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/tests/T1")
                .json_body_partial(r#"{"subject": "s1", "topics": ["t1"], "total_marks": 20}"#);
            then.status(200).json_body(json!({
                "status": "success",
                "data": {"id": "T1", "total_questions": 5}
            }));
        })
        .await;

    let mut wizard = wizard_for(&server);
    let outcome = wizard.enter(&Route::parse("/tests/create/T1?mode=edit")).await.unwrap();
    assert_eq!(outcome, EntryOutcome::Hydrated { test_id: "T1".to_string() });

    let form = wizard.prefill_form().await.unwrap();
    assert_eq!(form.subject, "s1");
    assert_eq!(form.topics, ["t1"]);
    assert_eq!(form.sub_topics, ["st1"]);
    assert_eq!(form.duration_minutes, 60);

    wizard.submit_basic(&form).await.unwrap();
    update.assert_async().await;
    assert_eq!(wizard.authoring().unwrap().total(), 5);
}

#[tokio::test]
async fn test_failed_edit_load_leaves_empty_draft() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tests/T404");
            then.status(404).body("not found");
        })
        .await;

    let mut wizard = wizard_for(&server);
    let outcome = wizard.enter(&Route::edit("T404")).await.unwrap();

    assert_eq!(outcome, EntryOutcome::LoadFailed { test_id: "T404".to_string() });
    assert_eq!(wizard.store(), &WizardStore::default());
    assert_eq!(wizard.current_step(), WizardStep::Basic);
}

#[tokio::test]
async fn test_view_mode_never_writes() {
    let server = MockServer::start_async().await;
    mock_catalogs(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tests/T1");
            then.status(200).json_body(json!({
                "status": "success",
                "data": {
                    "id": "T1",
                    "name": "Algebra 1",
                    "subject": "Algebra",
                    "topics": ["Linear Equations"],
                    "difficulty": "easy",
                    "correct_marks": 5,
                    "total_questions": 2,
                    "total_marks": 10
                }
            }));
        })
        .await;
    let writes = server
        .mock_async(|when, then| {
            when.method(PUT).path("/tests/T1");
            then.status(200).json_body(json!({"status": "success"}));
        })
        .await;

    let mut wizard = wizard_for(&server);
    wizard.enter(&Route::view("T1")).await.unwrap();
    let form = wizard.prefill_form().await.unwrap();

    assert!(matches!(
        wizard.submit_basic(&form).await,
        Err(WizardError::ReadOnly)
    ));
    wizard.browse_next().unwrap();
    wizard.browse_next().unwrap();
    wizard.confirm().unwrap();
    assert!(matches!(wizard.publish().await, Err(WizardError::ReadOnly)));
    assert_eq!(writes.hits_async().await, 0);
}
