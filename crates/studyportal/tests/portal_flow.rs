//! End-to-end flows against an in-process mock backend.

use axum::http::StatusCode as AxumStatus;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studyportal::actions::{assignments, auth, dashboard};
use studyportal::guard;
use studyportal::models::{AnswerEntry, Question, QuestionOption, QuestionType};
use studyportal::nav::{NavCall, Navigator, RecordingNavigator, Route};
use studyportal::quiz::{QuizPhase, QuizSession};
use studyportal::storage::{MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY};
use studyportal::{PortalConfig, PortalState};

/// Binds the router on an ephemeral port and returns the client base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn portal_state(base_url: String) -> Arc<PortalState> {
    let config = PortalConfig {
        base_url,
        ..PortalConfig::default()
    };
    PortalState::new(config, Arc::new(MemoryTokenStore::new())).unwrap()
}

#[tokio::test]
async fn login_persists_token_and_sets_session_flag() {
    let app = Router::new().route(
        "/api/users/login/",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["email"], "a@b.com");
            assert_eq!(body["password"], "secret");
            Json(serde_json::json!({"access": "tok123"}))
        }),
    );
    let state = portal_state(spawn_backend(app).await);

    let status = auth::login(&state, "a@b.com", "secret").await.unwrap();

    assert_eq!(status.as_u16(), 200);
    assert_eq!(
        state.storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("tok123")
    );
    assert!(state.session().is_authenticated);
    assert!(!state.session().is_loading);
}

#[tokio::test]
async fn failed_login_persists_nothing_and_surfaces_toast() {
    let app = Router::new().route(
        "/api/users/login/",
        post(|| async {
            (
                AxumStatus::BAD_REQUEST,
                Json(serde_json::json!({"detail": "Invalid credentials."})),
            )
        }),
    );
    let state = portal_state(spawn_backend(app).await);

    let result = auth::login(&state, "a@b.com", "wrong").await;

    assert!(result.is_err());
    assert_eq!(state.storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(!state.session().is_authenticated);
    assert!(!state.session().is_loading);
    let session = state.session();
    assert_eq!(
        session.notice.as_ref().unwrap().message,
        "Invalid credentials."
    );
}

#[tokio::test]
async fn fetch_populates_slice_and_clears_loading() {
    let app = Router::new().route(
        "/api/users/student/dashboard/",
        get(|| async {
            Json(serde_json::json!([
                {"id": 1, "name": "Mathematics", "description": "<p>Algebra</p>"},
                {"id": 2, "name": "Physics", "description": ""}
            ]))
        }),
    );
    let state = portal_state(spawn_backend(app).await);
    state.storage.set(ACCESS_TOKEN_KEY, "tok123").unwrap();

    let status = dashboard::fetch_subjects(&state).await.unwrap();

    assert_eq!(status.as_u16(), 200);
    assert!(!state.session().is_loading);
    let resources = state.resources();
    let subjects = resources.subjects.get().unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].name, "Mathematics");
}

#[tokio::test]
async fn fetch_failure_clears_loading_and_writes_one_toast() {
    let app = Router::new().route(
        "/api/users/student/dashboard/",
        get(|| async {
            (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"detail": "Dashboard unavailable"})),
            )
        }),
    );
    let state = portal_state(spawn_backend(app).await);
    state.storage.set(ACCESS_TOKEN_KEY, "tok123").unwrap();

    let result = dashboard::fetch_subjects(&state).await;

    assert!(result.is_err());
    assert!(!state.session().is_loading);
    assert!(state.resources().subjects.get().is_none());
    let session = state.session();
    assert_eq!(
        session.notice.as_ref().unwrap().message,
        "Dashboard unavailable"
    );
}

#[tokio::test]
async fn unreachable_backend_counts_as_network_failure() {
    // Nothing listens on this port; connect fails outright.
    let state = portal_state("http://127.0.0.1:1/api".to_string());
    state.storage.set(ACCESS_TOKEN_KEY, "tok123").unwrap();

    let result = dashboard::fetch_subjects(&state).await;

    assert!(result.is_err());
    assert!(!state.session().is_loading);
    assert!(state.session().notice.is_some());
}

#[tokio::test]
async fn unauthorized_response_tears_down_session_from_any_screen() {
    let app = Router::new().route(
        "/api/users/subjects/5/announcements/",
        get(|| async { AxumStatus::UNAUTHORIZED }),
    );
    let state = portal_state(spawn_backend(app).await);
    state.storage.set(ACCESS_TOKEN_KEY, "tok-stale").unwrap();
    state.session_mut().is_authenticated = true;

    let navigator: Arc<RecordingNavigator> = Arc::new(RecordingNavigator::new());
    let _listener = guard::spawn_listener(state.clone(), navigator.clone() as Arc<dyn Navigator>);

    let result = dashboard::fetch_announcements(&state, 5).await;
    assert!(matches!(
        result,
        Err(studyportal::PortalError::Unauthorized)
    ));

    // The teardown runs on the listener task; wait for the redirect.
    let mut redirected = false;
    for _ in 0..100 {
        if navigator.last().is_some() {
            redirected = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(redirected, "guard never redirected to login");

    assert_eq!(navigator.last(), Some(NavCall::Replace(Route::Login)));
    assert_eq!(state.storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(!state.session().is_authenticated);
    // No slice is left stuck in a loading state.
    assert!(!state.session().is_loading);
}

fn quiz_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            question_text: "<p>2 + 2?</p>".into(),
            question_type: QuestionType::Mcq,
            options: vec![
                QuestionOption { id: 10, text: "3".into() },
                QuestionOption { id: 11, text: "4".into() },
            ],
        },
        Question {
            id: 2,
            question_text: "<p>Explain.</p>".into(),
            question_type: QuestionType::Text,
            options: vec![],
        },
        Question {
            id: 3,
            question_text: "<p>Pick one.</p>".into(),
            question_type: QuestionType::Mcq,
            options: vec![QuestionOption { id: 30, text: "A".into() }],
        },
    ]
}

#[tokio::test]
async fn quiz_submits_only_answered_questions() {
    let captured: Arc<Mutex<Option<Vec<AnswerEntry>>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();
    let app = Router::new().route(
        "/api/users/assignments/7/submit/mixed/",
        post(move |Json(entries): Json<Vec<AnswerEntry>>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(entries);
                Json(serde_json::json!({"detail": "Submitted"}))
            }
        }),
    );
    let state = portal_state(spawn_backend(app).await);
    state.storage.set(ACCESS_TOKEN_KEY, "tok123").unwrap();

    let mut quiz = QuizSession::new(7, quiz_questions());
    quiz.record_choice(1, 11).unwrap();
    quiz.record_text(2, "Because it is.").unwrap();
    // Question 3 skipped on purpose.
    quiz.next();
    quiz.next();

    let status = quiz.submit(&state).await.unwrap();

    assert_eq!(status.as_u16(), 200);
    assert_eq!(quiz.phase(), QuizPhase::Submitted);
    assert!(!state.session().is_loading);

    let entries = captured.lock().unwrap().take().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.question_id != 3));

    // Submit-once: a second submission attempt is rejected locally.
    assert!(quiz.submit(&state).await.is_err());
}

#[tokio::test]
async fn failed_submission_preserves_answers_for_retry() {
    let app = Router::new().route(
        "/api/users/assignments/7/submit/mixed/",
        post(|| async {
            (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"detail": "Try again later"})),
            )
        }),
    );
    let state = portal_state(spawn_backend(app).await);
    state.storage.set(ACCESS_TOKEN_KEY, "tok123").unwrap();

    let mut quiz = QuizSession::new(7, quiz_questions());
    quiz.record_choice(1, 11).unwrap();
    quiz.next();
    quiz.next();

    let result = quiz.submit(&state).await;

    assert!(result.is_err());
    // Reverted to the last question with the student's input intact.
    assert_eq!(quiz.phase(), QuizPhase::Viewing(2));
    assert_eq!(quiz.answer(1), Some("11"));
    assert!(!state.session().is_loading);
    let session = state.session();
    assert_eq!(session.notice.as_ref().unwrap().message, "Try again later");
}

#[tokio::test]
async fn submission_payload_round_trips_through_assignments_action() {
    let captured: Arc<Mutex<usize>> = Arc::new(Mutex::new(0));
    let sink = captured.clone();
    let app = Router::new().route(
        "/api/users/assignments/9/submit/mixed/",
        post(move |Json(entries): Json<Vec<AnswerEntry>>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = entries.len();
                Json(serde_json::json!({}))
            }
        }),
    );
    let state = portal_state(spawn_backend(app).await);
    state.storage.set(ACCESS_TOKEN_KEY, "tok123").unwrap();

    let entries = vec![AnswerEntry {
        question_id: 4,
        answer: "42".into(),
    }];
    let status = assignments::submit_answers(&state, 9, &entries).await.unwrap();

    assert_eq!(status.as_u16(), 200);
    assert_eq!(*captured.lock().unwrap(), 1);
}
