//! In-memory stand-in for a realtime-database meal collection.
//!
//! Serves `GET /meals.json` with the collection as an object keyed by store
//! key, in insertion order, or `null` when the collection is empty. `POST
//! /meals.json` pushes a meal under a generated key and answers
//! `{"name": "<key>"}`. A `Fault` replaces every `GET` answer with a fixed
//! status and raw body so clients can be driven through failure paths.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Meal {
    pub fn new(name: &str, description: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }
}

/// Fixed answer served instead of the collection.
#[derive(Clone, Debug)]
pub struct Fault {
    pub status: u16,
    pub body: String,
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    meals: Vec<(String, Meal)>,
    fault: Option<Fault>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four meals the demo collection ships with.
    pub fn demo() -> Self {
        Self::new()
            .with_meal("m1", Meal::new("Sushi", "Finest fish and veggies", 22.99))
            .with_meal("m2", Meal::new("Schnitzel", "A german specialty!", 16.5))
            .with_meal("m3", Meal::new("Barbecue Burger", "American, raw, meaty", 12.99))
            .with_meal("m4", Meal::new("Green Bowl", "Healthy...and green...", 18.99))
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            meals: Vec::new(),
            fault: Some(Fault {
                status,
                body: body.to_string(),
            }),
        }
    }

    pub fn with_meal(mut self, key: &str, meal: Meal) -> Self {
        self.meals.push((key.to_string(), meal));
        self
    }
}

/// Serializes the collection as a JSON object without re-sorting keys.
struct Collection<'a>(&'a [(String, Meal)]);

impl Serialize for Collection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, meal) in self.0 {
            map.serialize_entry(key, meal)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PushResponse {
    pub name: String,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/meals.json", get(list_meals).post(push_meal))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Store::new()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn list_meals(State(db): State<Db>) -> Response {
    let store = db.read().await;
    if let Some(fault) = &store.fault {
        tracing::info!(status = fault.status, "serving injected fault");
        let status = StatusCode::from_u16(fault.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return json_response(status, fault.body.clone());
    }

    tracing::info!(count = store.meals.len(), "serving meal collection");
    let body = if store.meals.is_empty() {
        Ok("null".to_string())
    } else {
        serde_json::to_string(&Collection(&store.meals))
    };
    match body {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize collection");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn push_meal(State(db): State<Db>, Json(meal): Json<Meal>) -> Json<PushResponse> {
    let key = format!("-{}", Uuid::new_v4().simple());
    tracing::info!(%key, name = %meal.name, "pushed meal");
    db.write().await.meals.push((key.clone(), meal));
    Json(PushResponse { name: key })
}
