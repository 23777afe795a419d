//! Single-owner actor wrapper around the store.
//!
//! One dedicated thread owns the `Store`; everyone else holds a cloneable
//! `StoreClient` and talks over a channel. Dispatch is therefore serialized
//! by the queue: every action is atomic and total with respect to snapshots,
//! with no locking. Dropping the `StoreHandle` shuts the thread down
//! deterministically.

use crate::action::Action;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use bf_model::PlantState;
use crossbeam_channel as xch;
use std::thread::JoinHandle;

enum Request {
    Dispatch(Action),
    DispatchSync(Action, xch::Sender<StoreResult<()>>),
    Snapshot(xch::Sender<PlantState>),
    Shutdown,
}

/// Cloneable sender side of the store actor.
#[derive(Clone)]
pub struct StoreClient {
    tx: xch::Sender<Request>,
}

impl StoreClient {
    /// Enqueue an action without waiting for the result. Dispatch failures
    /// are logged by the actor.
    pub fn dispatch(&self, action: Action) -> StoreResult<()> {
        self.tx
            .send(Request::Dispatch(action))
            .map_err(|_| StoreError::Disconnected)
    }

    /// Apply an action and wait for its result.
    pub fn dispatch_sync(&self, action: Action) -> StoreResult<()> {
        let (reply_tx, reply_rx) = xch::bounded(1);
        self.tx
            .send(Request::DispatchSync(action, reply_tx))
            .map_err(|_| StoreError::Disconnected)?;
        reply_rx.recv().map_err(|_| StoreError::Disconnected)?
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> StoreResult<PlantState> {
        let (reply_tx, reply_rx) = xch::bounded(1);
        self.tx
            .send(Request::Snapshot(reply_tx))
            .map_err(|_| StoreError::Disconnected)?;
        reply_rx.recv().map_err(|_| StoreError::Disconnected)
    }
}

/// Owning handle of the store actor thread.
pub struct StoreHandle {
    client: StoreClient,
    join: Option<JoinHandle<PlantState>>,
}

impl StoreHandle {
    /// Move `store` onto its own thread and start processing actions.
    pub fn spawn(store: Store) -> Self {
        let (tx, rx) = xch::unbounded();
        let join = std::thread::Builder::new()
            .name("bf-store".to_string())
            .spawn(move || run_actor(store, rx))
            .expect("failed to spawn store thread");

        Self {
            client: StoreClient { tx },
            join: Some(join),
        }
    }

    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }

    pub fn dispatch(&self, action: Action) -> StoreResult<()> {
        self.client.dispatch(action)
    }

    pub fn dispatch_sync(&self, action: Action) -> StoreResult<()> {
        self.client.dispatch_sync(action)
    }

    pub fn snapshot(&self) -> StoreResult<PlantState> {
        self.client.snapshot()
    }

    /// Stop the actor and return the final state.
    pub fn shutdown(mut self) -> PlantState {
        let _ = self.client.tx.send(Request::Shutdown);
        self.join
            .take()
            .expect("store already shut down")
            .join()
            .expect("store thread panicked")
    }
}

impl Drop for StoreHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.client.tx.send(Request::Shutdown);
            if join.join().is_err() {
                tracing::warn!("store thread panicked during shutdown");
            }
        }
    }
}

fn run_actor(mut store: Store, rx: xch::Receiver<Request>) -> PlantState {
    while let Ok(request) = rx.recv() {
        match request {
            Request::Dispatch(action) => {
                let kind = action.kind();
                if let Err(err) = store.dispatch(action) {
                    tracing::warn!(action = kind, %err, "dispatch failed");
                }
            }
            Request::DispatchSync(action, reply) => {
                let _ = reply.send(store.dispatch(action));
            }
            Request::Snapshot(reply) => {
                let _ = reply.send(store.state().clone());
            }
            Request::Shutdown => break,
        }
    }
    store.into_state()
}
