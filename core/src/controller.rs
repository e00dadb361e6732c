//! Fetch lifecycle for the meal viewer, as a sans-IO state machine.
//!
//! # Design
//! `MealsController` owns the `FetchState` and hands out the collection
//! request exactly once. The host performs the round-trip and reports the
//! outcome through `resolve`. Once the state has settled it never changes
//! again, and once the controller is unmounted late outcomes are dropped
//! instead of being applied to a torn-down viewer.

use tracing::{debug, info, warn};

use crate::client::MealsClient;
use crate::error::{FetchError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::MealRecord;

/// The three mutually exclusive states of the viewer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Error(String),
    Ready(Vec<MealRecord>),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Error and Ready are terminal.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn records(&self) -> &[MealRecord] {
        match self {
            FetchState::Ready(records) => records,
            _ => &[],
        }
    }
}

impl From<Result<Vec<MealRecord>, FetchError>> for FetchState {
    fn from(result: Result<Vec<MealRecord>, FetchError>) -> Self {
        match result {
            Ok(records) => FetchState::Ready(records),
            Err(err) => FetchState::Error(err.to_string()),
        }
    }
}

/// Where the controller is in its one-shot lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Mounted,
    InFlight,
    Settled,
    Unmounted,
}

/// Drives one fetch of the meal collection from mount to a terminal state.
#[derive(Debug)]
pub struct MealsController {
    client: MealsClient,
    state: FetchState,
    phase: Phase,
}

impl MealsController {
    pub fn new(client: MealsClient) -> Self {
        Self {
            client,
            state: FetchState::Loading,
            phase: Phase::Mounted,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_unmounted(&self) -> bool {
        self.phase == Phase::Unmounted
    }

    /// Hand out the collection request. Only the first call on a mounted
    /// controller returns `Some`.
    pub fn start(&mut self) -> Option<HttpRequest> {
        if self.phase != Phase::Mounted {
            debug!(phase = ?self.phase, "fetch already started; ignoring start");
            return None;
        }
        self.phase = Phase::InFlight;
        let request = self.client.build_fetch_meals();
        info!(url = %request.url, "fetching meals");
        Some(request)
    }

    /// Apply the outcome of the round-trip. Returns whether the state changed.
    pub fn resolve(&mut self, outcome: Result<HttpResponse, TransportError>) -> bool {
        match self.phase {
            Phase::InFlight => {}
            Phase::Unmounted => {
                debug!("controller unmounted; discarding fetch outcome");
                return false;
            }
            phase => {
                warn!(?phase, "fetch outcome with no request in flight; ignoring");
                return false;
            }
        }

        let result = outcome
            .map_err(FetchError::from)
            .and_then(|response| self.client.parse_fetch_meals(response));
        match &result {
            Ok(records) => info!(count = records.len(), "meals loaded"),
            Err(FetchError::Status { status }) => warn!(status, "meal store returned an error status"),
            Err(err) => warn!(error = %err, "fetching meals failed"),
        }

        self.state = FetchState::from(result);
        self.phase = Phase::Settled;
        true
    }

    /// Tear the controller down. Any outcome still in flight is dropped.
    pub fn unmount(&mut self) {
        if self.phase == Phase::InFlight {
            debug!("unmounting with fetch in flight");
        }
        self.phase = Phase::Unmounted;
    }
}
