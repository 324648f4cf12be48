// ABOUTME: Integration tests for the HTTP API against the composed router
// ABOUTME: Drives auth, workout CRUD, validation and photo upload through oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;

use ferro::auth::AuthManager;
use ferro::config::{AuthConfig, ServerConfig, StorageBackend, StorageConfig};
use ferro::database::{Database, UpsertUser};
use ferro::resources::ServerResources;
use ferro::server::HttpServer;
use ferro::storage::LocalStorage;

const TEST_SECRET: &[u8] = b"test-secret";

struct TestApp {
    router: Router,
    resources: Arc<ServerResources>,
    // Held so uploaded files survive for the duration of a test
    upload_dir: TempDir,
}

async fn test_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    let database = Database::from_pool(pool);
    database.migrate().await.expect("migrations");

    let upload_dir = tempfile::tempdir().expect("temp dir");
    let config = Arc::new(ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        cors_origin: None,
        auth: AuthConfig {
            secret: String::from_utf8_lossy(TEST_SECRET).into_owned(),
            token_expiry_hours: 24,
        },
        storage: StorageConfig {
            backend: StorageBackend::Local {
                root: upload_dir.path().to_path_buf(),
            },
            public_base_url: "http://localhost:8081".to_owned(),
        },
    });

    let storage = Arc::new(LocalStorage::new(
        upload_dir.path().to_path_buf(),
        "http://localhost:8081",
    ));
    let auth_manager = AuthManager::new(TEST_SECRET, 24);

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        storage,
        config,
    ));
    let router = HttpServer::new(resources.clone()).router();

    TestApp {
        router,
        resources,
        upload_dir,
    }
}

impl TestApp {
    /// Create a user row and mint a session token for it
    async fn login(&self, open_id: &str) -> String {
        self.resources
            .database
            .upsert_user(&UpsertUser {
                open_id: open_id.to_owned(),
                name: Some("Test User".to_owned()),
                email: None,
                login_method: Some("google".to_owned()),
                role: None,
            })
            .await
            .expect("user upsert");
        self.resources
            .auth_manager
            .generate_token(open_id)
            .expect("session token")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn post_json(&self, uri: &str, token: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    async fn put_json(&self, uri: &str, token: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

fn treino_a_body() -> Value {
    json!({
        "name": "Treino A",
        "date": "2025-06-10T10:00:00Z",
        "notes": "Treino focado em peito",
        "exercises": [
            {"name": "Supino Reto", "sets": 4, "reps": 10, "weight": 80}
        ]
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;
    let (status, body) = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_me_unauthenticated_is_null() {
    let app = test_app().await;
    let (status, body) = app
        .send(Request::builder().uri("/api/auth/me").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_auth_callback_creates_user_and_sets_cookie() {
    let app = test_app().await;

    let assertion = app
        .resources
        .auth_manager
        .sign_identity_assertion("openid-novo", Some("Ana"), Some("ana@example.com"), Some("google"))
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/callback")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "token": assertion })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(cookie.starts_with("ferro_session="));
    assert!(cookie.contains("HttpOnly"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["open_id"], "openid-novo");
    assert_eq!(body["name"], "Ana");

    // The cookie authenticates subsequent requests
    let (status, me) = app
        .send(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["open_id"], "openid-novo");
}

#[tokio::test]
async fn test_workout_crud_end_to_end() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (status, created) = app.post_json("/api/workouts", &token, &treino_a_body()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);

    let (status, list) = app.get("/api/workouts", &token).await;
    assert_eq!(status, StatusCode::OK);
    let workouts = list.as_array().unwrap();
    assert_eq!(workouts.len(), 1);
    let workout = &workouts[0];
    assert_eq!(workout["name"], "Treino A");
    let exercises = workout["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["name"], "Supino Reto");

    // Volume = sets × reps × weight
    let volume = exercises[0]["sets"].as_i64().unwrap()
        * exercises[0]["reps"].as_i64().unwrap()
        * exercises[0]["weight"].as_i64().unwrap();
    assert_eq!(volume, 3200);

    let (status, fetched) = app.get(&format!("/api/workouts/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);

    let (status, updated) = app
        .put_json(
            &format!("/api/workouts/{id}"),
            &token,
            &json!({"name": "Treino A - Renomeado"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["success"], true);

    let (status, _) = app.delete(&format!("/api/workouts/{id}"), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = app.get("/api/workouts", &token).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_workout_validation_rejects_bad_input() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    // Missing name
    let (status, _) = app
        .post_json(
            "/api/workouts",
            &token,
            &json!({
                "name": "  ",
                "date": "2025-06-10T10:00:00Z",
                "exercises": [{"name": "Supino Reto", "sets": 4, "reps": 10, "weight": 80}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No exercises
    let (status, body) = app
        .post_json(
            "/api/workouts",
            &token,
            &json!({"name": "Treino A", "date": "2025-06-10T10:00:00Z", "exercises": []}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    // Negative weight
    let (status, _) = app
        .post_json(
            "/api/workouts",
            &token,
            &json!({
                "name": "Treino A",
                "date": "2025-06-10T10:00:00Z",
                "exercises": [{"name": "Supino Reto", "sets": 4, "reps": 10, "weight": -5}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was written
    let (_, list) = app.get("/api/workouts", &token).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_workout_of_another_user_is_not_found() {
    let app = test_app().await;
    let owner = app.login("openid-owner").await;
    let intruder = app.login("openid-intruder").await;

    let (_, created) = app.post_json("/api/workouts", &owner, &treino_a_body()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/workouts/{id}"), &intruder).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let (status, _) = app.delete(&format!("/api/workouts/{id}"), &intruder).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() {
    let app = test_app().await;

    let (status, body) = app
        .send(Request::builder().uri("/api/workouts").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let (status, _) = app
        .send(Request::builder().uri("/api/exercise-library").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_exercise_update_through_parent_workout() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (_, created) = app.post_json("/api/workouts", &token, &treino_a_body()).await;
    let workout_id = created["id"].as_i64().unwrap();

    let (status, exercises) = app
        .get(&format!("/api/workouts/{workout_id}/exercises"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let exercise_id = exercises.as_array().unwrap()[0]["id"].as_i64().unwrap();

    let (status, body) = app
        .put_json(
            &format!("/api/exercises/{exercise_id}"),
            &token,
            &json!({"completed": false, "weight": 85}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, exercises) = app
        .get(&format!("/api/workouts/{workout_id}/exercises"), &token)
        .await;
    let updated = &exercises.as_array().unwrap()[0];
    assert_eq!(updated["completed"], false);
    assert_eq!(updated["weight"], 85);
}

#[tokio::test]
async fn test_photo_upload_and_delete_flow() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    // "ferro fitness" base64-encoded
    let upload = json!({
        "file_data": "ZmVycm8gZml0bmVzcw==",
        "file_name": "frente.jpg",
        "content_type": "image/jpeg",
        "pose": "front",
        "week": 1,
        "date": "2025-06-10T08:00:00Z"
    });

    let (status, body) = app.post_json("/api/photos", &token, &upload).await;
    assert_eq!(status, StatusCode::CREATED);
    let url = body["url"].as_str().unwrap();
    assert!(!url.is_empty());
    assert!(url.contains("frente.jpg"));

    let (status, list) = app.get("/api/photos", &token).await;
    assert_eq!(status, StatusCode::OK);
    let photos = list.as_array().unwrap();
    assert_eq!(photos.len(), 1);
    let photo = &photos[0];
    assert_eq!(photo["pose"], "front");
    assert_eq!(photo["week"], 1);
    for field in [
        "weight",
        "chest",
        "waist",
        "hips",
        "left_arm",
        "right_arm",
        "left_thigh",
        "right_thigh",
        "left_calf",
        "right_calf",
    ] {
        assert_eq!(photo[field], Value::Null, "{field} should be null");
    }

    // The object landed in local storage
    let stored: Vec<_> = walk_files(app.upload_dir.path());
    assert_eq!(stored.len(), 1);

    let id = photo["id"].as_i64().unwrap();
    let (status, _) = app.delete(&format!("/api/photos/{id}"), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Row and object are both gone
    let (_, list) = app.get("/api/photos", &token).await;
    assert!(list.as_array().unwrap().is_empty());
    assert!(walk_files(app.upload_dir.path()).is_empty());
}

#[tokio::test]
async fn test_photo_upload_rejects_invalid_pose_and_week() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (status, _) = app
        .post_json(
            "/api/photos",
            &token,
            &json!({
                "file_data": "ZmVycm8=",
                "file_name": "a.jpg",
                "content_type": "image/jpeg",
                "pose": "diagonal",
                "week": 1,
                "date": "2025-06-10T08:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/api/photos",
            &token,
            &json!({
                "file_data": "ZmVycm8=",
                "file_name": "a.jpg",
                "content_type": "image/jpeg",
                "pose": "front",
                "week": 0,
                "date": "2025-06-10T08:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_custom_exercise_with_data_url_media() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (status, created) = app
        .post_json(
            "/api/user-exercises",
            &token,
            &json!({
                "name": "Remada Cavalinho",
                "muscle_group": "Costas",
                "difficulty": "avancado",
                "image_data": "data:image/gif;base64,ZmVycm8="
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_i64().unwrap() > 0);

    let (_, list) = app.get("/api/user-exercises", &token).await;
    let exercises = list.as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["media_type"], "gif");
    assert!(exercises[0]["media_url"].as_str().unwrap().contains("exercises/"));
    assert_eq!(exercises[0]["difficulty"], "avancado");
}

#[tokio::test]
async fn test_templates_round_trip_preserves_order() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (status, created) = app
        .post_json(
            "/api/templates",
            &token,
            &json!({
                "name": "Treino A",
                "description": "Peito e tríceps",
                "exercises": [
                    {"name": "Supino Reto", "sets": 4, "reps": 10, "weight": 80},
                    {"name": "Crucifixo", "sets": 3, "reps": 12, "weight": 20},
                    {"name": "Tríceps Testa", "sets": 3, "reps": 10, "weight": 30}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, template) = app.get(&format!("/api/templates/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let exercises = template["exercises"].as_array().unwrap();
    let positions: Vec<i64> = exercises
        .iter()
        .map(|e| e["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);

    let (status, _) = app.delete(&format!("/api/templates/{id}"), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_weekly_stats_reflect_created_workouts() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let body = json!({
        "name": "Treino de hoje",
        "date": chrono::Utc::now().to_rfc3339(),
        "exercises": [{"name": "Supino Reto", "sets": 4, "reps": 10, "weight": 80}]
    });
    let (status, _) = app.post_json("/api/workouts", &token, &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, stats) = app.get("/api/stats/weekly", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["this_week"]["workouts"], 1);
    assert_eq!(stats["this_week"]["volume"], 3200);
    assert_eq!(stats["this_week"]["distinct_exercises"], 1);
    // Empty previous window renders as a neutral indicator
    assert_eq!(stats["volume_change"]["direction"], "neutral");
}

#[tokio::test]
async fn test_records_endpoint_tracks_heaviest_occurrence() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    for (date, weight) in [("2025-05-05T10:00:00Z", 80), ("2025-05-12T10:00:00Z", 90)] {
        let body = json!({
            "name": "Treino",
            "date": date,
            "exercises": [{"name": "Supino Reto", "sets": 4, "reps": 10, "weight": weight}]
        });
        app.post_json("/api/workouts", &token, &body).await;
    }

    let (status, body) = app.get("/api/stats/records", &token).await;
    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["max_weight"], 90);
    assert_eq!(body["summary"]["total_records"], 1);
}

#[tokio::test]
async fn test_calendar_endpoint_returns_42_cells() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (status, grid) = app
        .get("/api/stats/calendar?year=2025&month=6", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grid.as_array().unwrap().len(), 42);

    let (status, _) = app
        .get("/api/stats/calendar?year=2025&month=13", &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_endpoint_validates_window() {
    let app = test_app().await;
    let token = app.login("openid-1").await;

    let (status, _) = app.get("/api/stats/progress?days=14", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/stats/progress?days=30", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_workouts"], 0);
    assert_eq!(body["stats"]["consistency_pct"], 0);
    assert!(body["series"].as_array().unwrap().is_empty());
}

/// Recursively collect file paths under a directory
fn walk_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            files.extend(walk_files(&path));
        } else {
            files.push(path);
        }
    }
    files
}
