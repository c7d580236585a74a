//! Exercises the real `ZoomClient` against an in-process fake of the Zoom API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use zoom_recordings::classifier::RecordingFilter;
use zoom_recordings::collector::collect_meetings;
use zoom_recordings::config::{Config, DateRange};
use zoom_recordings::report::RunSummary;
use zoom_recordings::trash::{trash_file, trash_files, TrashMode, TrashOutcome, TrashTarget};
use zoom_recordings::zoom::{Meeting, RecordingType, ZoomClient, ZoomError};

const BASIC_CLIENT_SECRET: &str = "Basic Y2xpZW50OnNlY3JldA==";
const ACCESS_TOKEN: &str = "tok-123";
const UNRESOLVABLE_UUID: &str = "stale-uuid==";

#[derive(Clone, Default)]
struct FakeZoom {
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeZoom {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(prefix))
            .collect()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {ACCESS_TOKEN}"))
        .unwrap_or(false)
}

fn invalid_token() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"code": 124, "message": "Invalid access token."})),
    )
}

async fn token(
    State(fake): State<FakeZoom>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    fake.record(format!(
        "TOKEN grant_type={} account_id={}",
        query.get("grant_type").cloned().unwrap_or_default(),
        query.get("account_id").cloned().unwrap_or_default()
    ));

    let basic = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if basic != BASIC_CLIENT_SECRET {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"reason": "Invalid client_id or client_secret", "error": "invalid_client"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "bearer",
            "expires_in": 3599,
            "scope": "recording:read:admin recording:write:admin"
        })),
    )
}

async fn recordings(
    State(fake): State<FakeZoom>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return invalid_token();
    }

    let page_token = query.get("next_page_token").cloned().unwrap_or_default();
    fake.record(format!(
        "LIST from={} to={} page_size={} token={}",
        query.get("from").cloned().unwrap_or_default(),
        query.get("to").cloned().unwrap_or_default(),
        query.get("page_size").cloned().unwrap_or_default(),
        page_token
    ));

    let body = match page_token.as_str() {
        "" => json!({
            "from": "2025-10-06",
            "to": "2025-10-07",
            "page_size": 300,
            "total_records": 3,
            "next_page_token": "page-2",
            "meetings": [
                {
                    "uuid": UNRESOLVABLE_UUID,
                    "id": 111,
                    "topic": "Design review",
                    "start_time": "2025-10-06T09:00:00Z",
                    "recording_files": [
                        {"id": "a1", "recording_type": "audio_only", "recording_start": "2025-10-06T09:00:05Z"},
                        {"id": "v1", "recording_type": "shared_screen_with_speaker_view"}
                    ]
                },
                {
                    "uuid": "ok/uuid==",
                    "id": 222,
                    "topic": "Standup",
                    "recording_files": [
                        {"id": "a2", "recording_type": "audio_only"}
                    ]
                }
            ]
        }),
        "page-2" => json!({
            "next_page_token": "",
            "meetings": [
                {
                    "id": 333,
                    "topic": "Retro",
                    "recording_files": [
                        {"id": "a3", "recording_type": "audio_only"},
                        {"id": "t3", "recording_type": "timeline"}
                    ]
                }
            ]
        }),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"code": 300, "message": "Invalid next_page_token."})),
            )
        }
    };

    (StatusCode::OK, Json(body))
}

async fn trash(
    State(fake): State<FakeZoom>,
    Path((meeting, file)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return invalid_token().into_response();
    }

    fake.record(format!(
        "DELETE meeting={} file={} action={}",
        meeting,
        file,
        query.get("action").cloned().unwrap_or_default()
    ));

    if meeting == UNRESOLVABLE_UUID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"code": 3301, "message": "This recording does not exist."})),
        )
            .into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn users_me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return invalid_token();
    }
    (
        StatusCode::OK,
        Json(json!({
            "email": "admin@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "type": 2,
            "status": "active"
        })),
    )
}

async fn spawn_fake() -> (String, FakeZoom) {
    let fake = FakeZoom::default();
    let app = Router::new()
        .route("/oauth/token", post(token))
        .route("/v2/accounts/me/recordings", get(recordings))
        .route("/v2/meetings/:meeting/recordings/:file", delete(trash))
        .route("/v2/users/me", get(users_me))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), fake)
}

fn config(base: &str, client_id: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("ACCOUNT_ID", "acct-1".to_string()),
        ("CLIENT_ID", client_id.to_string()),
        ("CLIENT_SECRET", "secret".to_string()),
        ("ZOOM_OAUTH_URL", format!("{base}/oauth/token")),
        ("ZOOM_API_BASE_URL", format!("{base}/v2")),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn range() -> DateRange {
    DateRange::parse("2025-10-06", "2025-10-07").unwrap()
}

#[tokio::test]
async fn test_connect_exchanges_account_credentials() {
    let (base, fake) = spawn_fake().await;

    ZoomClient::connect(&config(&base, "client")).await.unwrap();

    assert_eq!(
        fake.calls(),
        vec!["TOKEN grant_type=account_credentials account_id=acct-1"]
    );
}

#[tokio::test]
async fn test_connect_reports_bad_credentials() {
    let (base, _fake) = spawn_fake().await;

    let err = ZoomClient::connect(&config(&base, "wrong"))
        .await
        .err()
        .expect("connect should fail");

    match err {
        ZoomError::Api {
            status, message, ..
        } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Invalid client_id or client_secret");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_collects_every_page() {
    let (base, fake) = spawn_fake().await;
    let client = ZoomClient::connect(&config(&base, "client")).await.unwrap();

    let collection = collect_meetings(&client, &range()).await.unwrap();

    let ids: Vec<u64> = collection.meetings.iter().filter_map(|m| m.id).collect();
    assert_eq!(ids, vec![111, 222, 333]);
    assert_eq!(collection.page_count, 2);
    assert_eq!(
        fake.calls_starting_with("LIST"),
        vec![
            "LIST from=2025-10-06 to=2025-10-07 page_size=300 token=",
            "LIST from=2025-10-06 to=2025-10-07 page_size=300 token=page-2",
        ]
    );
    assert_eq!(
        collection.meetings[0].extra.get("start_time"),
        Some(&json!("2025-10-06T09:00:00Z"))
    );
}

#[tokio::test]
async fn test_unresolvable_uuid_falls_back_to_meeting_id() {
    let (base, fake) = spawn_fake().await;
    let client = ZoomClient::connect(&config(&base, "client")).await.unwrap();
    let collection = collect_meetings(&client, &range()).await.unwrap();
    let meeting = &collection.meetings[0];
    let mut out = Vec::new();

    let outcome = trash_file(
        &client,
        meeting,
        &meeting.recording_files[0],
        TrashMode::Trash,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(outcome, TrashOutcome::Trashed(TrashTarget::MeetingId));
    assert_eq!(
        fake.calls_starting_with("DELETE"),
        vec![
            format!("DELETE meeting={UNRESOLVABLE_UUID} file=a1 action=trash"),
            "DELETE meeting=111 file=a1 action=trash".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_trash_pipeline_over_all_pages() {
    let (base, fake) = spawn_fake().await;
    let client = ZoomClient::connect(&config(&base, "client")).await.unwrap();
    let collection = collect_meetings(&client, &range()).await.unwrap();
    let selected =
        RecordingFilter::Only(RecordingType::AudioOnly).select_from_meetings(&collection.meetings);
    let mut out = Vec::new();

    let summary = trash_files(&client, &selected, TrashMode::Trash, &mut out)
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            matched: 3,
            acted: 3,
            failed: 0
        }
    );
    let deletes = fake.calls_starting_with("DELETE");
    assert_eq!(deletes.len(), 4);
    assert!(deletes.contains(&"DELETE meeting=ok/uuid== file=a2 action=trash".to_string()));
    assert!(deletes.contains(&"DELETE meeting=333 file=a3 action=trash".to_string()));
    assert!(deletes.iter().all(|call| call.ends_with("action=trash")));
}

#[tokio::test]
async fn test_dry_run_never_deletes() {
    let (base, fake) = spawn_fake().await;
    let client = ZoomClient::connect(&config(&base, "client")).await.unwrap();
    let collection = collect_meetings(&client, &range()).await.unwrap();
    let selected =
        RecordingFilter::Only(RecordingType::AudioOnly).select_from_meetings(&collection.meetings);
    let mut out = Vec::new();

    let summary = trash_files(&client, &selected, TrashMode::DryRun, &mut out)
        .await
        .unwrap();

    assert_eq!(summary.matched, 3);
    assert_eq!(summary.acted, 0);
    assert!(fake.calls_starting_with("DELETE").is_empty());
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches("DRY-RUN").count(), 3);
}

#[tokio::test]
async fn test_leading_slash_uuid_is_double_encoded() {
    let (base, fake) = spawn_fake().await;
    let client = ZoomClient::connect(&config(&base, "client")).await.unwrap();
    let meeting = Meeting {
        uuid: Some("/lead==".to_string()),
        id: Some(9),
        ..Default::default()
    };
    let file = zoom_recordings::zoom::RecordingFile {
        id: Some("f9".to_string()),
        recording_type: Some("audio_only".to_string()),
        ..Default::default()
    };
    let mut out = Vec::new();

    trash_file(&client, &meeting, &file, TrashMode::Trash, &mut out)
        .await
        .unwrap();

    // Axum decodes the path once, leaving the first encoding visible.
    assert_eq!(
        fake.calls_starting_with("DELETE"),
        vec!["DELETE meeting=%2Flead%3D%3D file=f9 action=trash"]
    );
}

#[tokio::test]
async fn test_current_user() {
    let (base, _fake) = spawn_fake().await;
    let client = ZoomClient::connect(&config(&base, "client")).await.unwrap();

    let user = client.current_user().await.unwrap();

    assert_eq!(user.email.as_deref(), Some("admin@example.com"));
    assert_eq!(user.display_name(), "Ada Lovelace");
    assert_eq!(user.status.as_deref(), Some("active"));
}

#[tokio::test]
async fn test_expired_token_aborts_collection() {
    let (base, _fake) = spawn_fake().await;
    let client = ZoomClient::with_token(
        reqwest::Client::new(),
        &format!("{base}/v2"),
        "expired".to_string(),
    );

    let err = collect_meetings(&client, &range()).await.unwrap_err();

    let zoom_err = err.downcast_ref::<ZoomError>().expect("a Zoom error");
    assert_eq!(zoom_err.code(), Some(124));
}
