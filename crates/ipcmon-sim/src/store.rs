//! ---
//! ipcmon_section: "02-simulation"
//! ipcmon_subsection: "module"
//! ipcmon_type: "source"
//! ipcmon_scope: "code"
//! ipcmon_description: "Shared observable store updated by a single ticking task."
//! ipcmon_version: "v0.1.0"
//! ipcmon_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use ipcmon_common::config::SimulationConfig;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::activity::ActivityKind;
use crate::simulator::{DashboardSnapshot, TelemetrySimulator, TickKind};

/// Single source of truth for every panel.
///
/// One spawned task owns the three tick timers. Panels subscribe to the watch
/// channel and only ever see whole [`DashboardSnapshot`]s; commands go through
/// the store so they are serialised with the ticks.
#[derive(Debug)]
pub struct TelemetryStore {
    simulator: Arc<Mutex<TelemetrySimulator>>,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TelemetryStore {
    /// Start the ticking task. Must be called from within a Tokio runtime.
    pub fn spawn(config: &SimulationConfig) -> Self {
        Self::spawn_with(TelemetrySimulator::new(config.seed), config)
    }

    pub fn spawn_with(simulator: TelemetrySimulator, config: &SimulationConfig) -> Self {
        let (snapshots, _) = watch::channel(Arc::new(simulator.snapshot()));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let simulator = Arc::new(Mutex::new(simulator));
        let task = spawn_tick_task(
            simulator.clone(),
            snapshots.clone(),
            config.clone(),
            shutdown_rx,
        );
        info!(
            seed = config.seed,
            connection_ms = config.connection_interval.as_millis() as u64,
            activity_ms = config.activity_interval.as_millis() as u64,
            report_ms = config.report_interval.as_millis() as u64,
            "telemetry store started"
        );
        Self {
            simulator,
            snapshots,
            shutdown,
            task: Mutex::new(Some(task)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn send_message(&self, kind: ActivityKind, text: &str) -> bool {
        self.mutate(|sim| sim.send_message(kind, text))
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.mutate(|sim| sim.login(username, password))
    }

    pub fn sign_out(&self) {
        self.mutate(|sim| sim.sign_out())
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut TelemetrySimulator) -> T) -> T {
        let mut simulator = self.simulator.lock();
        let result = apply(&mut simulator);
        publish(&simulator, &self.snapshots);
        result
    }

    /// Stop the ticking task and wait for it to exit. Safe to call more than once.
    pub async fn shutdown(&self) {
        let _ = self.shutdown.send(true);
        let handle = self.task.lock().take();
        if let Some(task) = handle {
            if let Err(err) = task.await {
                warn!(error = %err, "telemetry task join error");
            }
            info!("telemetry store stopped");
        }
    }
}

impl Drop for TelemetryStore {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

fn publish(simulator: &TelemetrySimulator, snapshots: &watch::Sender<Arc<DashboardSnapshot>>) {
    snapshots.send_replace(Arc::new(simulator.snapshot()));
}

fn ticker(period: Duration) -> Interval {
    let period = period.max(Duration::from_millis(1));
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn spawn_tick_task(
    simulator: Arc<Mutex<TelemetrySimulator>>,
    snapshots: watch::Sender<Arc<DashboardSnapshot>>,
    config: SimulationConfig,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut connection = ticker(config.connection_interval);
        let mut activity = ticker(config.activity_interval);
        let mut report = ticker(config.report_interval);

        loop {
            let kind = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("telemetry shutdown signal received");
                        break;
                    }
                    continue;
                }
                _ = connection.tick() => TickKind::Connection,
                _ = activity.tick() => TickKind::Activity,
                _ = report.tick() => TickKind::Report,
            };
            let mut guard = simulator.lock();
            guard.tick(kind);
            publish(&guard, &snapshots);
        }
        debug!("telemetry loop exited");
    })
}
