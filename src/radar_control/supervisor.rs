use super::departures::TrafficController;
use super::radar_scope::RadarScope;
use crate::{error, info};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The outer polling loop: refresh the scope, run the controller, drain the
/// directive queue, sleep, repeat.
///
/// One tick runs to completion before the next begins; the scope and
/// controller state are mutated by the active tick alone. Cancellation is
/// checked at tick boundaries only, never mid-tick, so a cancelled session
/// still finishes submitting whatever the current tick decided.
pub struct Supervisor<C: TrafficController> {
    scope: RadarScope,
    controller: C,
    cancel: CancellationToken,
}

impl<C: TrafficController> Supervisor<C> {
    /// Fixed delay between ticks.
    const TICK_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(scope: RadarScope, controller: C) -> Self {
        Self { scope, controller, cancel: CancellationToken::new() }
    }

    /// Handle for other tasks (ctrl-c handler) to request shutdown.
    pub fn cancellation_token(&self) -> CancellationToken { self.cancel.clone() }

    pub fn scope(&self) -> &RadarScope { &self.scope }

    /// Runs the simulation loop until cancelled or a fatal error surfaces.
    ///
    /// A failed telemetry refresh ends the loop: the external state is
    /// authoritative and continuing blind risks stale or duplicate
    /// clearances. A classification error ends it too; it means this build
    /// no longer understands what it is looking at.
    pub async fn run(&mut self) {
        info!("Supervisor loop starting ({}s tick)", Self::TICK_INTERVAL.as_secs());
        loop {
            if self.cancel.is_cancelled() {
                info!("Cancellation requested, supervisor loop exiting");
                return;
            }
            if let Err(err) = self.scope.refresh().await {
                error!("Telemetry refresh failed, terminating: {err}");
                return;
            }
            if let Err(err) = self.controller.do_routing(&mut self.scope) {
                error!("Routing aborted, terminating: {err}");
                return;
            }
            self.scope.execute_directives().await;

            tokio::select! {
                () = self.cancel.cancelled() => {}
                () = tokio::time::sleep(Self::TICK_INTERVAL) => {}
            }
        }
    }
}
