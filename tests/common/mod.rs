//! In-process stand-in for the vector database HTTP API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct MockState {
    pub schemas: Mutex<Vec<Value>>,
    /// (id, object body) in insertion order.
    pub objects: Mutex<Vec<(String, Value)>>,
    pub queries: Mutex<Vec<String>>,
    pub delete_calls: AtomicUsize,
    /// Ids whose delete answers 500 and leaves the object in place.
    pub fail_delete: Mutex<HashSet<String>>,
    /// Raw body returned by `/v1/graphql` instead of the real listing.
    pub graphql_override: Mutex<Option<String>>,
    /// Pause before answering `/v1/graphql` and deletes.
    pub response_delay: Mutex<Option<Duration>>,
    next_id: AtomicUsize,
}

impl MockState {
    pub fn seed(&self, ids: &[&str]) {
        let mut objects = self.objects.lock().unwrap();
        for id in ids {
            objects.push((id.to_string(), json!({"class": "Document", "properties": {}})));
        }
    }

    pub fn fail_deletes_of(&self, ids: &[&str]) {
        let mut fail = self.fail_delete.lock().unwrap();
        fail.extend(ids.iter().map(|id| id.to_string()));
    }

    pub fn delay_responses(&self, delay: Duration) {
        *self.response_delay.lock().unwrap() = Some(delay);
    }

    async fn pause(&self) {
        let delay = *self.response_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn object_ids(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/v1/schema", post(create_schema))
            .route("/v1/objects", post(create_object).get(list_objects))
            .route("/v1/objects/:id", delete(delete_object))
            .route("/v1/graphql", post(graphql))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }
}

type Shared = State<Arc<MockState>>;

async fn create_schema(State(state): Shared, Json(body): Json<Value>) -> Response {
    let mut schemas = state.schemas.lock().unwrap();
    if schemas.iter().any(|s| s["class"] == body["class"]) {
        let error = json!({"error": [{"message": "class name Document already exists"}]});
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(error)).into_response();
    }
    schemas.push(body.clone());
    (StatusCode::OK, Json(body)).into_response()
}

async fn create_object(State(state): Shared, Json(body): Json<Value>) -> Response {
    let n = state.next_id.fetch_add(1, Ordering::SeqCst);
    let id = format!("00000000-0000-0000-0000-{:012}", n);
    state
        .objects
        .lock()
        .unwrap()
        .push((id.clone(), body.clone()));

    let mut created = body;
    created["id"] = json!(id);
    (StatusCode::OK, Json(created)).into_response()
}

async fn list_objects(State(state): Shared) -> Response {
    let objects = state.objects.lock().unwrap();
    let listed: Vec<Value> = objects
        .iter()
        .map(|(id, body)| {
            let mut object = body.clone();
            object["id"] = json!(id);
            object
        })
        .collect();
    Json(json!({"objects": listed, "totalResults": listed.len()})).into_response()
}

async fn delete_object(State(state): Shared, Path(id): Path<String>) -> Response {
    state.pause().await;
    state.delete_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_delete.lock().unwrap().contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable").into_response();
    }

    let mut objects = state.objects.lock().unwrap();
    match objects.iter().position(|(stored, _)| *stored == id) {
        Some(index) => {
            objects.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn graphql(State(state): Shared, Json(body): Json<Value>) -> Response {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    state.queries.lock().unwrap().push(query);
    state.pause().await;

    if let Some(raw) = state.graphql_override.lock().unwrap().clone() {
        return (StatusCode::OK, raw).into_response();
    }

    let entries: Vec<Value> = state
        .object_ids()
        .into_iter()
        .map(|id| json!({"_additional": {"id": id}}))
        .collect();
    Json(json!({"data": {"Get": {"Document": entries}}})).into_response()
}
