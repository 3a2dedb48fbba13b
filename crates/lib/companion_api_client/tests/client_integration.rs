//! Integration tests — run the client against an in-process axum server
//! mounted at `/api` on an ephemeral port.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use companion_api_client::{
    ApiClient, ApiError, ClientConfig, Credential, MemoryTokenStore, TokenStore,
};
use companion_core::builder::ModuleBuilder;
use companion_core::models::{
    AdminLogin, AssistantAction, ChatRequest, ItemFilters, Module, ModuleCreate, ModuleUpdate,
};
use companion_core::templates::{UiKind, template};
use serde_json::{Value, json};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct AppState {
    modules: Arc<Mutex<Vec<Module>>>,
    next_id: Arc<Mutex<u32>>,
}

type HandlerResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

fn require_admin(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(v) if v == expected => Ok(()),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Not authenticated")),
    }
}

async fn active_event() -> Json<Value> {
    Json(json!({
        "id": "e1",
        "title": "Summer Academy",
        "date_start": "2025-07-01T09:00:00",
        "date_end": "2025-07-03T18:00:00",
        "status": "active",
    }))
}

async fn event(Path(id): Path<String>) -> Response {
    if id == "broken" {
        return (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response();
    }
    detail(StatusCode::NOT_FOUND, "Event not found").into_response()
}

async fn items(Query(query): Query<BTreeMap<String, String>>) -> Json<Value> {
    let echoed: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    Json(json!([{
        "id": "i1",
        "event_id": "e1",
        "title": echoed.join("&"),
        "registered_count": 3,
        "capacity": 10,
    }]))
}

async fn login(Json(body): Json<Value>) -> HandlerResult {
    if body["username"] == "admin" && body["password"] == "secret" {
        Ok(Json(json!({ "access_token": TOKEN, "token_type": "bearer" })))
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Invalid credentials"))
    }
}

async fn admin_modules(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> HandlerResult {
    require_admin(&headers)?;
    let mut modules: Vec<Module> = state
        .modules
        .lock()
        .unwrap()
        .iter()
        .filter(|m| m.event_id == event_id)
        .cloned()
        .collect();
    modules.sort_by_key(|m| m.order);
    Ok(Json(serde_json::to_value(modules).unwrap()))
}

async fn create_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(create): Json<ModuleCreate>,
) -> HandlerResult {
    require_admin(&headers)?;
    let mut next = state.next_id.lock().unwrap();
    *next += 1;
    let module = Module {
        id: format!("m{next}"),
        event_id: create.event_id,
        kind: create.kind,
        title: create.title,
        icon: create.icon,
        enabled: create.enabled,
        order: create.order,
        badge_type: create.badge_type,
        badge_value: create.badge_value,
        config: create.config,
        created_at: None,
        updated_at: None,
    };
    state.modules.lock().unwrap().push(module.clone());
    Ok(Json(serde_json::to_value(module).unwrap()))
}

async fn update_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<ModuleUpdate>,
) -> HandlerResult {
    require_admin(&headers)?;
    let mut modules = state.modules.lock().unwrap();
    let Some(m) = modules.iter_mut().find(|m| m.id == id) else {
        return Err(detail(StatusCode::NOT_FOUND, "Module not found"));
    };
    if let Some(title) = update.title {
        m.title = title;
    }
    if let Some(enabled) = update.enabled {
        m.enabled = enabled;
    }
    if let Some(config) = update.config {
        m.config = config;
    }
    Ok(Json(serde_json::to_value(m.clone()).unwrap()))
}

async fn delete_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> HandlerResult {
    require_admin(&headers)?;
    state.modules.lock().unwrap().retain(|m| m.id != id);
    Ok(Json(json!({ "success": true })))
}

async fn reorder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(_event_id): Path<String>,
    Json(body): Json<Value>,
) -> HandlerResult {
    require_admin(&headers)?;
    let ids: Vec<String> = serde_json::from_value(body["module_ids"].clone())
        .map_err(|_| detail(StatusCode::UNPROCESSABLE_ENTITY, "module_ids required"))?;
    let mut modules = state.modules.lock().unwrap();
    for (order, id) in ids.iter().enumerate() {
        if let Some(m) = modules.iter_mut().find(|m| &m.id == id) {
            m.order = order as i32;
        }
    }
    Ok(Json(json!({ "success": true })))
}

async fn chat(Json(req): Json<ChatRequest>) -> Json<Value> {
    Json(json!({
        "response": format!("You asked: {}", req.message),
        "sources": ["program"],
        "actions": [{ "type": "open_map", "label": "Hall B", "location_id": "l-2" }],
    }))
}

async fn spawn_server() -> (String, AppState) {
    let state = AppState::default();
    let api = Router::new()
        .route("/events/active", get(active_event))
        .route("/events/{id}", get(event))
        .route("/events/{id}/items", get(items))
        .route("/admin/login", post(login))
        .route("/admin/events/{id}/modules", get(admin_modules))
        .route("/modules", post(create_module))
        .route("/modules/{id}", put(update_module).delete(delete_module))
        .route("/modules/reorder/{event_id}", put(reorder))
        .route("/assistant/chat", post(chat))
        .with_state(state.clone());
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/api"), state)
}

async fn client() -> (ApiClient, AppState) {
    let (url, state) = spawn_server().await;
    let config = ClientConfig::new(&url).expect("config");
    (ApiClient::new(config), state)
}

#[tokio::test]
async fn active_event_accepts_naive_timestamps() {
    let (client, _) = client().await;
    let event = client.active_event().await.expect("active event");
    assert_eq!(event.title, "Summer Academy");
    assert_eq!(event.date_start.to_rfc3339(), "2025-07-01T09:00:00+00:00");
}

#[tokio::test]
async fn errors_carry_detail_or_status() {
    let (client, _) = client().await;

    let err = client.event("missing").await.expect_err("404");
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Event not found");

    let err = client.event("broken").await.expect_err("502");
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "HTTP error 502");
}

#[tokio::test]
async fn item_filters_become_query_parameters() {
    let (client, _) = client().await;
    let filters = ItemFilters {
        item_type: Some("workshop".into()),
        available_only: true,
        ..ItemFilters::default()
    };
    let items = client.event_items("e1", &filters).await.expect("items");
    assert_eq!(items[0].title, "available_only=true&type=workshop");
    assert_eq!(items[0].occupancy(), "3/10");

    let items = client
        .event_items("e1", &ItemFilters::default())
        .await
        .expect("items");
    assert_eq!(items[0].title, "");
}

#[tokio::test]
async fn admin_calls_need_login() {
    let (mut client, _) = client().await;
    let store = MemoryTokenStore::new();

    let err = client.admin_event_modules("e1").await.expect_err("401");
    assert!(err.is_unauthorized());

    let bad = AdminLogin {
        username: "admin".into(),
        password: "wrong".into(),
    };
    let err = client.login(&bad, &store).await.expect_err("bad login");
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(store.load().expect("load").is_none());

    let empty = AdminLogin {
        username: " ".into(),
        password: "x".into(),
    };
    assert!(matches!(
        client.login(&empty, &store).await,
        Err(ApiError::Validation(_))
    ));

    let good = AdminLogin {
        username: "admin".into(),
        password: "secret".into(),
    };
    client.login(&good, &store).await.expect("login");
    assert_eq!(
        store.load().expect("load").as_ref().map(Credential::token),
        Some(TOKEN)
    );
    assert!(client.admin_event_modules("e1").await.expect("modules").is_empty());

    client.logout(&store).expect("logout");
    assert!(client.credential().is_none());
    assert!(store.load().expect("load").is_none());
}

#[tokio::test]
async fn builder_persists_through_client() {
    let (client, state) = client().await;
    let client = client.with_credential(Credential::new(TOKEN));

    let mut builder = ModuleBuilder::new("e1");
    builder.load(&client).await.expect("load");
    assert!(builder.is_empty());

    builder.add_from_template(template(UiKind::Info).expect("info"));
    builder.add_from_template(template(UiKind::Partners).expect("partners"));
    builder.add_from_template(template(UiKind::Map).expect("map"));
    builder.reorder(2, 0).expect("reorder");
    builder.save(&client).await.expect("save");

    let mut reloaded = ModuleBuilder::new("e1");
    reloaded.load(&client).await.expect("reload");
    let kinds: Vec<UiKind> = reloaded.modules().iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![UiKind::Map, UiKind::Info, UiKind::Info]);
    assert_eq!(
        reloaded.modules()[2].config["gridColumns"],
        json!(3),
        "partners config survives the kind collapse"
    );

    let map_id = reloaded.modules()[0].id.clone();
    let enabled = reloaded
        .toggle_persisted(&client, &map_id)
        .await
        .expect("toggle");
    assert!(!enabled);
    assert!(
        !state
            .modules
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.id == map_id && m.enabled)
    );

    reloaded
        .remove_persisted(&client, &map_id)
        .await
        .expect("remove");
    assert_eq!(state.modules.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn chat_returns_typed_actions() {
    let (client, _) = client().await;
    let request = ChatRequest {
        event_id: "e1".into(),
        message: "Where is the workshop?".into(),
        context: None,
    };
    let reply = client.chat(&request).await.expect("chat");
    assert_eq!(reply.response, "You asked: Where is the workshop?");
    assert_eq!(reply.sources, vec!["program"]);
    assert_eq!(
        reply.actions,
        vec![AssistantAction::OpenMap {
            label: Some("Hall B".into()),
            location_id: "l-2".into(),
        }]
    );
}
