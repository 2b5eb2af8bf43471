use super::common::Vec2D;
use super::directive::Directive;
use super::flight::{AircraftSpec, Flight, FlightMode, Status, TurnDirection};
use super::waypoint::{Airport, Waypoint, WaypointType};
use crate::sim_bridge::{BridgeError, CommandSink, RawFlightRecord, TelemetrySource};
use crate::{error, info, tick, twr, warn};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Process-wide snapshot of the world: every flight on scope, the session's
/// waypoints and airport, the active runways and wind, plus the queue of
/// directives awaiting submission.
///
/// Owned by the supervisor and mutated by exactly one tick at a time, so no
/// locking is needed anywhere in here. The scope is also the single owner of
/// the telemetry source and command sink handles.
pub struct RadarScope {
    source: Arc<dyn TelemetrySource>,
    sink: Arc<dyn CommandSink>,
    flights: HashMap<String, Flight>,
    waypoints: Vec<Arc<Waypoint>>,
    waypoint_index: HashMap<String, Arc<Waypoint>>,
    aircraft: Vec<Arc<AircraftSpec>>,
    airport: Airport,
    active_runways: Vec<Arc<Waypoint>>,
    wind_heading: i32,
    pending: VecDeque<Directive>,
}

impl RadarScope {
    /// Initializes the scope: fetches the session-constant config (waypoints,
    /// airfield elevation, aircraft models) and asks the simulation to scale
    /// its display so range markers are visible.
    pub async fn new(
        source: Arc<dyn TelemetrySource>,
        sink: Arc<dyn CommandSink>,
    ) -> Result<Self, BridgeError> {
        let config = source.fetch_scope_config().await?;

        let mut waypoints = Vec::with_capacity(config.waypoints.len());
        let mut waypoint_index = HashMap::new();
        for raw in &config.waypoints {
            let wp_type = WaypointType::from_raw(raw.wp_type).unwrap_or_else(|| {
                // Positional integrity matters more than the exact type here:
                // destination indices refer into this list.
                warn!("Waypoint {} has unknown type {}, treating as intersection", raw.name, raw.wp_type);
                WaypointType::Intersection
            });
            let waypoint = Arc::new(Waypoint::new(
                raw.name.clone(),
                wp_type,
                Vec2D::new(raw.x, raw.y),
                raw.heading,
            ));
            waypoint_index.insert(raw.name.clone(), Arc::clone(&waypoint));
            waypoints.push(waypoint);
        }

        let runways =
            waypoints.iter().filter(|wpt| wpt.is_runway()).map(Arc::clone).collect::<Vec<_>>();
        let airport = Airport::new(config.airfield_elevation, runways);

        let aircraft = config
            .aircraft
            .iter()
            .map(|raw| {
                Arc::new(AircraftSpec::new(raw.cruise_speed, raw.liftoff_speed, raw.approach_speed))
            })
            .collect();

        let mut scope = Self {
            source,
            sink,
            flights: HashMap::new(),
            waypoints,
            waypoint_index,
            aircraft,
            airport,
            active_runways: Vec::new(),
            wind_heading: 0,
            pending: VecDeque::new(),
        };

        scope.add_directive(Directive::explicit("SCALE"));
        scope.execute_directives().await;
        Ok(scope)
    }

    /// Pulls one telemetry snapshot and folds it into the scope: wind and
    /// active runways, then the flight map (upsert per callsign, off-radar
    /// sweep afterwards). Telemetry failure is returned to the supervisor;
    /// it is fatal there.
    pub async fn refresh(&mut self) -> Result<(), BridgeError> {
        let snapshot = self.source.fetch_snapshot().await?;

        self.wind_heading = snapshot.wind_heading;
        self.active_runways = snapshot
            .active_runways
            .iter()
            .filter_map(|&idx| match self.waypoints.get(idx) {
                Some(wpt) if wpt.is_runway() => Some(Arc::clone(wpt)),
                _ => {
                    warn!("Active runway index {idx} does not name a runway");
                    None
                }
            })
            .collect();

        for (callsign, record) in &snapshot.flights {
            let Some(record) = record else {
                tick!("{callsign} is still loading, skipped");
                continue;
            };
            let Some(fresh) = self.decode_flight(callsign, record) else {
                continue;
            };
            if let Some(existing) = self.flights.get_mut(callsign) {
                existing.update_from(&fresh);
            } else {
                info!("{callsign} is now on the scope ({})", fresh.model());
                self.flights.insert(callsign.clone(), fresh);
            }
        }

        self.flights.retain(|callsign, _| {
            let on_scope = snapshot.flights.contains_key(callsign);
            if !on_scope {
                info!("{callsign} left the scope");
            }
            on_scope
        });

        tick!(
            "Scope refreshed: {} flights, wind {}, {} active runways",
            self.flights.len(),
            self.wind_heading,
            self.active_runways.len()
        );
        Ok(())
    }

    /// Builds a domain flight from one raw record. Index references that do
    /// not resolve are a telemetry inconsistency: the record is dropped with
    /// a warning and the previous state (if any) carries the tick.
    fn decode_flight(&self, callsign: &str, record: &RawFlightRecord) -> Option<Flight> {
        let Some(destination) = self.waypoints.get(record.destination_index) else {
            warn!("{callsign} references unknown destination index {}", record.destination_index);
            return None;
        };
        let Some(spec) = self.aircraft.get(record.model_index) else {
            warn!("{callsign} references unknown aircraft model {}", record.model_index);
            return None;
        };
        let cleared_destination = if record.nav_clearance_id >= 0 {
            let idx = record.nav_clearance_id as usize;
            match self.waypoints.get(idx) {
                Some(wpt) => Some(Arc::clone(wpt)),
                None => {
                    warn!("{callsign} references unknown nav clearance index {idx}");
                    return None;
                }
            }
        } else {
            None
        };

        Some(Flight::new(
            callsign.to_string(),
            record.airline.clone(),
            record.aircraft.clone(),
            Arc::clone(spec),
            Status::from(record.timer_mode),
            FlightMode::from(record.flight_mode),
            Arc::clone(destination),
            cleared_destination,
            record.altitude,
            record.altitude_clearance,
            record.speed,
            record.speed_clearance,
            record.heading,
            record.heading_clearance,
            TurnDirection::from(record.turn),
            Vec2D::new(record.x, record.y),
            record.conflict,
            record.expedite,
        ))
    }

    /// Enqueues a directive for execution at the end of the tick.
    pub fn add_directive(&mut self, directive: Directive) {
        self.pending.push_back(directive);
    }

    /// Drains the pending queue in FIFO order through the command sink.
    ///
    /// A directive whose target has left the scope since it was enqueued is
    /// dropped with a warning; a sink failure is logged and the directive
    /// discarded (the next tick re-evaluates and may reissue naturally).
    pub async fn execute_directives(&mut self) {
        while let Some(directive) = self.pending.pop_front() {
            if !directive.callsign().is_empty() && !self.flights.contains_key(directive.callsign())
            {
                warn!("Dropping directive for {}: flight left the scope", directive.callsign());
                continue;
            }
            let text = directive.command_text();
            match self.sink.submit(&text).await {
                Ok(()) => twr!("{text}"),
                Err(err) => error!("Command '{text}' was not executed: {err}"),
            }
        }
    }

    /// Lateral distance between two flights in scope pixels; the geometry
    /// the risk thresholds are tuned against.
    pub fn distance(&self, a: &Flight, b: &Flight) -> f64 {
        a.pos().euclid_distance(&b.pos())
    }

    pub fn flights(&self) -> &HashMap<String, Flight> { &self.flights }

    pub fn flight(&self, callsign: &str) -> Option<&Flight> { self.flights.get(callsign) }

    pub fn airport(&self) -> &Airport { &self.airport }

    pub fn active_runways(&self) -> &[Arc<Waypoint>] { &self.active_runways }

    pub fn wind_heading(&self) -> i32 { self.wind_heading }

    pub fn waypoint(&self, name: &str) -> Option<&Arc<Waypoint>> { self.waypoint_index.get(name) }

    pub fn waypoints(&self) -> &[Arc<Waypoint>] { &self.waypoints }

    pub fn pending_directives(&self) -> &VecDeque<Directive> { &self.pending }
}
