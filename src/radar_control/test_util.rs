use super::common::Vec2D;
use super::flight::{AircraftSpec, Flight, FlightMode, Status, TurnDirection};
use super::waypoint::{Airport, Waypoint, WaypointType};
use std::sync::Arc;

pub(crate) const FIELD_ELEVATION: i32 = 600;

pub(crate) fn waypoint(name: &str, wp_type: WaypointType, x: f64, y: f64) -> Arc<Waypoint> {
    let heading = if wp_type == WaypointType::Runway { Some(270) } else { None };
    Arc::new(Waypoint::new(name.to_string(), wp_type, Vec2D::new(x, y), heading))
}

pub(crate) fn fix(name: &str) -> Arc<Waypoint> {
    waypoint(name, WaypointType::Vor, 420.0, 310.0)
}

pub(crate) fn runway(name: &str) -> Arc<Waypoint> {
    waypoint(name, WaypointType::Runway, 250.0, 250.0)
}

pub(crate) fn airport() -> Airport {
    Airport::new(FIELD_ELEVATION, vec![runway("27L"), runway("27R")])
}

/// Shorthand for the common test shape: a flight at the default position
/// bound for the `MIDWY` fix.
pub(crate) fn flight(
    callsign: &str,
    status: Status,
    mode: FlightMode,
    altitude: i32,
    speed: i32,
    cleared_destination: Option<Arc<Waypoint>>,
) -> Flight {
    FlightBuilder::new(callsign)
        .status(status)
        .mode(mode)
        .altitude(altitude)
        .speed(speed)
        .cleared_destination(cleared_destination)
        .build()
}

pub(crate) struct FlightBuilder {
    callsign: String,
    status: Status,
    mode: FlightMode,
    destination: Arc<Waypoint>,
    cleared_destination: Option<Arc<Waypoint>>,
    altitude: i32,
    cleared_altitude: i32,
    speed: i32,
    pos: Vec2D<f64>,
    conflict_warning: bool,
}

impl FlightBuilder {
    pub fn new(callsign: &str) -> Self {
        Self {
            callsign: callsign.to_string(),
            status: Status::Arrival,
            mode: FlightMode::FreeFlight,
            destination: fix("MIDWY"),
            cleared_destination: None,
            altitude: FIELD_ELEVATION,
            cleared_altitude: FIELD_ELEVATION,
            speed: 0,
            pos: Vec2D::new(250.0, 250.0),
            conflict_warning: false,
        }
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn mode(mut self, mode: FlightMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn destination(mut self, destination: Arc<Waypoint>) -> Self {
        self.destination = destination;
        self
    }

    pub fn cleared_destination(mut self, cleared: Option<Arc<Waypoint>>) -> Self {
        self.cleared_destination = cleared;
        self
    }

    pub fn altitude(mut self, altitude: i32) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn cleared_altitude(mut self, cleared_altitude: i32) -> Self {
        self.cleared_altitude = cleared_altitude;
        self
    }

    pub fn speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn pos(mut self, x: f64, y: f64) -> Self {
        self.pos = Vec2D::new(x, y);
        self
    }

    pub fn conflict_warning(mut self, conflict_warning: bool) -> Self {
        self.conflict_warning = conflict_warning;
        self
    }

    pub fn build(self) -> Flight {
        Flight::new(
            self.callsign,
            "TST".to_string(),
            "B738".to_string(),
            Arc::new(AircraftSpec::new(430, 160, 140)),
            self.status,
            self.mode,
            self.destination,
            self.cleared_destination,
            self.altitude,
            self.cleared_altitude,
            self.speed,
            self.speed,
            270,
            270,
            TurnDirection::Auto,
            self.pos,
            self.conflict_warning,
            false,
        )
    }
}
