//! Fetch-once meal catalogue core.
//!
//! # Overview
//! Builds the single collection request, parses the store's response into
//! ordered `MealRecord`s, tracks the three-state fetch lifecycle and selects
//! what the viewer shows. Nothing here touches the network: a host executes
//! the round-trip (host-does-IO pattern), which keeps the core deterministic
//! and lets the same state machine sit behind tokio or a C caller.
//!
//! # Design
//! - `MealsClient` is stateless and holds only the collection URL.
//! - `MealsController` owns `FetchState` and hands out its request once.
//! - `select_view` is a pure function of the state.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod mapper;
pub mod types;
pub mod view;

pub use client::{MealsClient, DEFAULT_COLLECTION_URL};
pub use controller::{FetchState, MealsController};
pub use error::{FetchError, TransportError, STATUS_FAILURE_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mapper::{decode_collection, map_meals, MealCollection};
pub use types::{MealRecord, StoredMeal};
pub use view::{select_view, MealItem, View, LOADING_TEXT};
