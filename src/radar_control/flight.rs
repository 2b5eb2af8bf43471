use super::common::Vec2D;
use super::waypoint::Waypoint;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use strum_macros::Display;

/// Flight status designators, assigned once by the simulation and carried in
/// the telemetry timer-mode char.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Arrival,
    Departure,
    Hold,
    Takeoff,
    /// The decoder saw a designator this build does not know. Kept raw so the
    /// classifier can report it instead of anything defaulting silently.
    Unrecognized(char),
}

impl From<char> for Status {
    fn from(value: char) -> Self {
        match value {
            'A' => Status::Arrival,
            'D' => Status::Departure,
            'H' => Status::Hold,
            'T' => Status::Takeoff,
            other => Status::Unrecognized(other),
        }
    }
}

/// Flight modes driven by the simulation, changing tick to tick.
///
/// `Stack` means holding at a vector.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    FreeFlight,
    QueuedTakeoff,
    Takeoff,
    ApproachRollout,
    Intercept,
    Stack,
    /// Raw mode outside the known set, see [`Status::Unrecognized`].
    Unrecognized(i64),
}

impl From<i64> for FlightMode {
    fn from(value: i64) -> Self {
        match value {
            0 => FlightMode::FreeFlight,
            1 => FlightMode::QueuedTakeoff,
            2 => FlightMode::Takeoff,
            3 => FlightMode::ApproachRollout,
            4 => FlightMode::Intercept,
            5 => FlightMode::Stack,
            other => FlightMode::Unrecognized(other),
        }
    }
}

/// Turn preference attached to the current clearance.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnDirection {
    #[default]
    Auto,
    Left,
    Right,
}

impl From<i64> for TurnDirection {
    fn from(value: i64) -> Self {
        match value {
            -1 => TurnDirection::Left,
            1 => TurnDirection::Right,
            _ => TurnDirection::Auto,
        }
    }
}

/// Performance figures for one aircraft model, fetched once with the scope
/// config (all speeds in knots).
#[derive(Debug, Clone, Copy)]
pub struct AircraftSpec {
    cruise_speed: i32,
    liftoff_speed: i32,
    approach_speed: i32,
}

impl AircraftSpec {
    pub fn new(cruise_speed: i32, liftoff_speed: i32, approach_speed: i32) -> Self {
        Self { cruise_speed, liftoff_speed, approach_speed }
    }

    pub fn cruise_speed(&self) -> i32 { self.cruise_speed }

    pub fn liftoff_speed(&self) -> i32 { self.liftoff_speed }

    pub fn approach_speed(&self) -> i32 { self.approach_speed }
}

/// One aircraft on the radar scope.
///
/// Created the tick its callsign first appears in telemetry, updated in place
/// every tick after that, and dropped the tick it goes off radar. Two flights
/// are the same flight iff their callsigns match.
#[derive(Debug, Clone)]
pub struct Flight {
    callsign: String,
    airline: String,
    model: String,
    spec: Arc<AircraftSpec>,
    status: Status,
    mode: FlightMode,
    destination: Arc<Waypoint>,
    cleared_destination: Option<Arc<Waypoint>>,
    altitude: i32,
    cleared_altitude: i32,
    speed: i32,
    cleared_speed: i32,
    heading: i32,
    cleared_heading: i32,
    turn: TurnDirection,
    pos: Vec2D<f64>,
    conflict_warning: bool,
    expedited: bool,
}

#[allow(clippy::too_many_arguments)]
impl Flight {
    pub fn new(
        callsign: String,
        airline: String,
        model: String,
        spec: Arc<AircraftSpec>,
        status: Status,
        mode: FlightMode,
        destination: Arc<Waypoint>,
        cleared_destination: Option<Arc<Waypoint>>,
        altitude: i32,
        cleared_altitude: i32,
        speed: i32,
        cleared_speed: i32,
        heading: i32,
        cleared_heading: i32,
        turn: TurnDirection,
        pos: Vec2D<f64>,
        conflict_warning: bool,
        expedited: bool,
    ) -> Self {
        Self {
            callsign,
            airline,
            model,
            spec,
            status,
            mode,
            destination,
            cleared_destination,
            altitude,
            cleared_altitude,
            speed,
            cleared_speed,
            heading,
            cleared_heading,
            turn,
            pos,
            conflict_warning,
            expedited,
        }
    }

    /// Overwrites every tick-varying field from a freshly decoded record.
    /// Identity fields (callsign, airline, model, spec, status) stay put.
    pub fn update_from(&mut self, fresh: &Flight) {
        debug_assert_eq!(self.callsign, fresh.callsign);
        self.mode = fresh.mode;
        self.destination = Arc::clone(&fresh.destination);
        self.cleared_destination = fresh.cleared_destination.clone();
        self.altitude = fresh.altitude;
        self.cleared_altitude = fresh.cleared_altitude;
        self.speed = fresh.speed;
        self.cleared_speed = fresh.cleared_speed;
        self.heading = fresh.heading;
        self.cleared_heading = fresh.cleared_heading;
        self.turn = fresh.turn;
        self.pos = fresh.pos;
        self.conflict_warning = fresh.conflict_warning;
        self.expedited = fresh.expedited;
    }

    pub fn callsign(&self) -> &str { &self.callsign }

    pub fn airline(&self) -> &str { &self.airline }

    pub fn model(&self) -> &str { &self.model }

    pub fn spec(&self) -> &AircraftSpec { &self.spec }

    pub fn status(&self) -> Status { self.status }

    pub fn mode(&self) -> FlightMode { self.mode }

    pub fn destination(&self) -> &Arc<Waypoint> { &self.destination }

    pub fn cleared_destination(&self) -> Option<&Arc<Waypoint>> {
        self.cleared_destination.as_ref()
    }

    pub fn altitude(&self) -> i32 { self.altitude }

    pub fn cleared_altitude(&self) -> i32 { self.cleared_altitude }

    pub fn speed(&self) -> i32 { self.speed }

    pub fn cleared_speed(&self) -> i32 { self.cleared_speed }

    pub fn heading(&self) -> i32 { self.heading }

    pub fn cleared_heading(&self) -> i32 { self.cleared_heading }

    pub fn turn(&self) -> TurnDirection { self.turn }

    pub fn pos(&self) -> Vec2D<f64> { self.pos }

    pub fn conflict_warning(&self) -> bool { self.conflict_warning }

    pub fn is_expedited(&self) -> bool { self.expedited }
}

impl PartialEq for Flight {
    fn eq(&self, other: &Self) -> bool { self.callsign == other.callsign }
}

impl Eq for Flight {}

impl Hash for Flight {
    fn hash<H: Hasher>(&self, state: &mut H) { self.callsign.hash(state); }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} {}kt hdg {} -> {}]",
            self.callsign, self.altitude, self.speed, self.heading, self.destination.name()
        )
    }
}
