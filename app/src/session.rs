//! Async host for a `MealsController`.
//!
//! # Design
//! Mounting a session spawns exactly one tokio task that takes the
//! controller's request, runs it through a `Transport` and applies the
//! outcome. The task races the round-trip against a shutdown `watch`
//! channel tied to the session; unmounting (or dropping) the session flips
//! it, and the task then drops the pending outcome instead of applying it.
//!
//! State is published on a second `watch` channel. Only the task writes it.

use std::sync::Arc;

use meals_core::{select_view, FetchState, MealsClient, MealsController, View};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::transport::Transport;

pub struct MealsSession {
    state: watch::Receiver<FetchState>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl MealsSession {
    /// Mount a viewer: issue the collection fetch once in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(client: MealsClient, transport: Arc<dyn Transport>) -> Self {
        let (state_tx, state_rx) = watch::channel(FetchState::Loading);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(url = client.url(), "mounting meals session");
        let controller = MealsController::new(client);
        let task = tokio::spawn(run_fetch(controller, transport, state_tx, shutdown_rx));

        Self {
            state: state_rx,
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> View {
        select_view(&self.state.borrow())
    }

    /// Wait for the fetch to settle. If the task ends without settling
    /// (unmounted first), returns the last published state.
    pub async fn settled(&self) -> FetchState {
        let mut rx = self.state.clone();
        let settled = rx.wait_for(FetchState::is_settled).await.map(|s| s.clone());
        settled.unwrap_or_else(|_| rx.borrow().clone())
    }

    /// Tear the session down and wait for its task to finish. Returns the
    /// final state, which is `Loading` if the fetch had not completed.
    pub async fn unmount(mut self) -> FetchState {
        self.shutdown.send_replace(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "meals fetch task ended abnormally");
            }
        }
        self.state()
    }
}

impl Drop for MealsSession {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

async fn run_fetch(
    mut controller: MealsController,
    transport: Arc<dyn Transport>,
    state_tx: watch::Sender<FetchState>,
    mut shutdown: watch::Receiver<bool>,
) {
    let Some(request) = controller.start() else {
        return;
    };

    let outcome = tokio::select! {
        outcome = transport.execute(request) => outcome,
        _ = shutdown.wait_for(|down| *down) => {
            controller.unmount();
            debug!("session unmounted before the fetch completed");
            return;
        }
    };

    if *shutdown.borrow() {
        controller.unmount();
    }
    if controller.resolve(outcome) {
        state_tx.send_replace(controller.state().clone());
    }
}
