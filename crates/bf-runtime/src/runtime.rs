//! Live plant runtime: store actor plus the two tickers.

use crate::error::RuntimeResult;
use crate::ticker::Ticker;
use bf_control::{ControlEngine, ControlLaw};
use bf_model::PlantState;
use bf_store::{Action, NotificationSink, Store, StoreClient, StoreHandle, StoreResult};
use std::time::Duration;

/// Source-default telemetry period.
pub const DEFAULT_TELEMETRY_PERIOD: Duration = Duration::from_secs(5);

/// Source-default control period.
pub const DEFAULT_CONTROL_PERIOD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub telemetry_period: Duration,
    pub control_period: Duration,
    pub law: ControlLaw,
    /// Seed for the drift simulator; `None` seeds from OS entropy.
    pub drift_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            telemetry_period: DEFAULT_TELEMETRY_PERIOD,
            control_period: DEFAULT_CONTROL_PERIOD,
            law: ControlLaw::default(),
            drift_seed: None,
        }
    }
}

/// The running plant: a store actor, a telemetry ticker, and a control
/// ticker.
///
/// Field order matters for drop: tickers halt before the store goes away, so
/// no tick callback can outlive the state it mutates.
pub struct PlantRuntime {
    telemetry: Ticker,
    control: Ticker,
    store: StoreHandle,
}

impl PlantRuntime {
    /// Spawn the store actor and both tickers.
    pub fn start(
        state: PlantState,
        sink: Box<dyn NotificationSink>,
        config: RuntimeConfig,
    ) -> RuntimeResult<Self> {
        let mut engine = ControlEngine::new(config.law, config.control_period.as_secs_f64())?;

        let store = match config.drift_seed {
            Some(seed) => Store::with_drift_seed(state, sink, seed),
            None => Store::new(state, sink),
        };
        let store = StoreHandle::spawn(store);

        let telemetry_client = store.client();
        let telemetry = Ticker::spawn("telemetry", config.telemetry_period, move || {
            if telemetry_client.dispatch(Action::SimulateData).is_err() {
                tracing::warn!("telemetry tick dropped: store disconnected");
            }
        });

        let control_client = store.client();
        let control = Ticker::spawn("control", config.control_period, move || {
            run_control_tick(&control_client, &mut engine);
        });

        Ok(Self {
            telemetry,
            control,
            store,
        })
    }

    pub fn client(&self) -> StoreClient {
        self.store.client()
    }

    pub fn snapshot(&self) -> StoreResult<PlantState> {
        self.store.snapshot()
    }

    /// Completed tick counts: `(telemetry, control)`.
    pub fn tick_counts(&self) -> (u64, u64) {
        (self.telemetry.ticks(), self.control.ticks())
    }

    /// Stop both tickers, then the store; returns the final state.
    pub fn stop(self) -> PlantState {
        let Self {
            telemetry,
            control,
            store,
        } = self;
        telemetry.stop();
        control.stop();
        store.shutdown()
    }
}

fn run_control_tick(client: &StoreClient, engine: &mut ControlEngine) {
    let snapshot = match client.snapshot() {
        Ok(snapshot) => snapshot,
        Err(_) => {
            tracing::warn!("control tick skipped: store disconnected");
            return;
        }
    };

    let pass = engine.pass(&snapshot);
    for controller in pass.controllers {
        if let Err(err) = client.dispatch(Action::UpdatePidController(controller)) {
            tracing::warn!(%err, "controller update dropped");
        }
    }
    for device in pass.devices {
        if let Err(err) = client.dispatch(Action::UpdateDevice(device)) {
            tracing::warn!(%err, "device update dropped");
        }
    }
}

/// Deterministic merged scheduler: drift-then-control in a fixed sequence,
/// `ticks` times, on the caller's thread.
///
/// Observable timing differs from the live dual-ticker mode on purpose; use
/// this for demos and tests that need reproducible trajectories.
pub fn run_lockstep(
    store: &mut Store,
    engine: &mut ControlEngine,
    ticks: usize,
) -> RuntimeResult<()> {
    for _ in 0..ticks {
        store.dispatch(Action::SimulateData)?;
        let pass = engine.pass(store.state());
        for controller in pass.controllers {
            store.dispatch(Action::UpdatePidController(controller))?;
        }
        for device in pass.devices {
            store.dispatch(Action::UpdateDevice(device))?;
        }
    }
    Ok(())
}
