#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod logger;
mod radar_control;
mod sim_bridge;

use crate::radar_control::{Departures, RadarScope, Supervisor};
use crate::sim_bridge::{CommandSink, SimBridge, TelemetrySource};
use std::{env, sync::Arc};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let base_url_var = env::var("ATC_BRIDGE_URL");
    let base_url = base_url_var.as_ref().map_or("http://localhost:5500", |v| v.as_str());
    info!("Connecting to sim bridge at {base_url}");

    let bridge = Arc::new(SimBridge::new(base_url));
    let source: Arc<dyn TelemetrySource> = bridge.clone();
    let sink: Arc<dyn CommandSink> = bridge;

    let scope = match RadarScope::new(source, sink).await {
        Ok(scope) => scope,
        Err(err) => fatal!("Scope initialization failed: {err}"),
    };
    info!(
        "Scope ready: field elevation {} ft, {} runways, {} waypoints on file",
        scope.airport().elevation(),
        scope.airport().runways().len(),
        scope.waypoints().len()
    );

    let mut supervisor = Supervisor::new(scope, Departures::new());
    let token = supervisor.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, winding down at the next tick boundary");
            token.cancel();
        }
    });

    supervisor.run().await;
    info!("Session closed");
}
