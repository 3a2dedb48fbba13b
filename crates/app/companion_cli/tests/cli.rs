use assert_cmd::Command;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};

fn companion() -> Command {
    let mut cmd = Command::cargo_bin("companion_cli").expect("binary");
    cmd.env_remove("COMPANION_API_URL")
        .env_remove("COMPANION_TOKEN")
        .env_remove("COMPANION_TOKEN_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package() {
    companion()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("companion_cli"));
}

#[test]
fn templates_list_and_detail() {
    companion()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("speakers").and(predicate::str::contains("networking")));

    companion()
        .args(["templates", "partners"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gridColumns").and(predicate::str::contains("= 3")));

    companion()
        .args(["templates", "map", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"defaultZoom\""));
}

#[test]
fn unknown_template_kind_fails() {
    companion()
        .args(["templates", "weather"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown module kind: weather"));
}

#[test]
fn blank_chat_message_is_rejected_before_sending() {
    let dir = tempfile::tempdir().expect("tempdir");
    companion()
        .args(["chat", "--event", "e1", "   "])
        .arg("--token-file")
        .arg(dir.path().join("admin_token"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("message is required"));
}

#[test]
fn unreachable_api_reports_and_hints() {
    let dir = tempfile::tempdir().expect("tempdir");
    companion()
        .args(["dashboard", "--api-url", "http://127.0.0.1:9/api"])
        .arg("--token-file")
        .arg(dir.path().join("admin_token"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Request failed").and(predicate::str::contains("retry")));
}

async fn spawn_server() -> String {
    let api = Router::new()
        .route(
            "/events/active",
            get(|| async {
                Json(json!({
                    "id": "e1",
                    "title": "Summer Academy",
                    "date_start": "2025-07-01T09:00:00",
                    "date_end": "2025-07-03T18:00:00",
                    "location": "Campus",
                    "status": "active",
                }))
            }),
        )
        .route(
            "/events/{id}/modules",
            get(|| async {
                Json(json!([
                    { "id": "m2", "event_id": "e1", "type": "news", "title": "News",
                      "order": 2, "badge_type": "count", "badge_value": "4" },
                    { "id": "m1", "event_id": "e1", "type": "program", "title": "Program",
                      "icon": "🗓", "order": 1 },
                    { "id": "m3", "event_id": "e1", "type": "map", "title": "Hidden map",
                      "order": 3, "enabled": false },
                ]))
            }),
        )
        .route(
            "/admin/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    Ok(Json(json!({ "access_token": "tok-123", "token_type": "bearer" })))
                } else {
                    Err((
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "detail": "Invalid credentials" })),
                    ))
                }
            }),
        );
    let app = Router::new().nest("/api", api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api")
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_and_login_against_server() {
    let url = spawn_server().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let token_file = dir.path().join("admin_token");

    let (u, t) = (url.clone(), token_file.clone());
    tokio::task::spawn_blocking(move || {
        companion()
            .args(["dashboard", "--api-url", &u])
            .arg("--token-file")
            .arg(&t)
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Summer Academy")
                    .and(predicate::str::contains("🗓 Program"))
                    .and(predicate::str::contains("News (4)"))
                    .and(predicate::str::contains("Hidden map").not()),
            );
    })
    .await
    .expect("dashboard");

    let (u, t) = (url.clone(), token_file.clone());
    tokio::task::spawn_blocking(move || {
        let output = companion()
            .args(["dashboard", "--json", "--api-url", &u])
            .arg("--token-file")
            .arg(&t)
            .output()
            .expect("run");
        assert!(output.status.success());
        let tiles: Value = serde_json::from_slice(&output.stdout).expect("stdout is only json");
        assert_eq!(tiles[1]["badge"], "4");
    })
    .await
    .expect("dashboard json");

    let (u, t) = (url.clone(), token_file.clone());
    tokio::task::spawn_blocking(move || {
        companion()
            .args(["login", "-u", "admin", "--password", "wrong", "--api-url", &u])
            .arg("--token-file")
            .arg(&t)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid credentials"));
    })
    .await
    .expect("bad login");
    assert!(!token_file.exists());

    let (u, t) = (url.clone(), token_file.clone());
    tokio::task::spawn_blocking(move || {
        companion()
            .args(["login", "-u", "admin", "--password", "secret", "--api-url", &u])
            .arg("--token-file")
            .arg(&t)
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Logged in as admin")
                    .and(predicate::str::contains("logged in as").not()),
            );
    })
    .await
    .expect("login");
    assert_eq!(
        std::fs::read_to_string(&token_file).expect("token file").trim(),
        "tok-123"
    );

    let t = token_file.clone();
    tokio::task::spawn_blocking(move || {
        companion()
            .arg("logout")
            .arg("--token-file")
            .arg(&t)
            .assert()
            .success();
    })
    .await
    .expect("logout");
    assert!(!token_file.exists());
}
