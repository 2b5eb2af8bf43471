use super::flight::Flight;
use super::waypoint::Waypoint;
use std::fmt;

/// Instruction verbs understood by the simulation's clearance box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Abort,
    Altitude,
    Destination,
    Speed,
    Land,
    Takeoff,
    LineupWait,
}

impl Instruction {
    /// Single-letter command code the simulation parses.
    fn code(self) -> char {
        match self {
            Instruction::Abort => 'a',
            Instruction::Altitude | Instruction::Destination => 'c',
            Instruction::Speed => 's',
            Instruction::Land => 'l',
            Instruction::Takeoff | Instruction::LineupWait => 't',
        }
    }

    /// Expedite only applies to altitude and speed changes.
    fn supports_expedite(self) -> bool {
        matches!(self, Instruction::Altitude | Instruction::Speed)
    }
}

/// One routing intent for one flight, rendered to the simulation's command
/// grammar on execution: `<callsign> <code> [<value>] [x]`.
///
/// Value object; the scope consumes it exactly once when draining the
/// pending queue.
#[derive(Debug, Clone)]
pub struct Directive {
    callsign: String,
    action: Instruction,
    value: Option<String>,
    expedite: bool,
    /// Raw command text bypassing the grammar above (session-level commands
    /// and hold-modifier clearances).
    explicit: Option<String>,
}

impl Directive {
    fn new(flight: &Flight, action: Instruction, value: Option<String>) -> Self {
        Self {
            callsign: flight.callsign().to_string(),
            action,
            value,
            expedite: false,
            explicit: None,
        }
    }

    /// Aborts the current landing or takeoff for the aircraft.
    pub fn abort(flight: &Flight) -> Self { Self::new(flight, Instruction::Abort, None) }

    /// Clears the flight to a new altitude (feet).
    pub fn change_altitude(flight: &Flight, altitude: i32) -> Self {
        Self::new(flight, Instruction::Altitude, Some(Self::format_altitude(altitude)))
    }

    /// Clears the flight direct to a waypoint.
    pub fn change_destination(flight: &Flight, destination: &Waypoint) -> Self {
        Self::new(flight, Instruction::Destination, Some(destination.name().to_string()))
    }

    /// Clears the flight to a new speed (knots).
    pub fn change_speed(flight: &Flight, speed: i32) -> Self {
        Self::new(flight, Instruction::Speed, Some(speed.to_string()))
    }

    /// Clears the flight to land on the given runway.
    pub fn land(flight: &Flight, runway: &Waypoint) -> Self {
        Self::new(flight, Instruction::Land, Some(runway.name().to_string()))
    }

    /// Clears the flight for takeoff from the runway it is holding on.
    pub fn takeoff(flight: &Flight) -> Self { Self::new(flight, Instruction::Takeoff, None) }

    /// Sends the flight to a holding pattern over the given fix
    /// (nav clearance with the hold modifier).
    pub fn hold(flight: &Flight, fix: &Waypoint) -> Self {
        let mut directive = Self::new(flight, Instruction::Destination, Some(fix.name().to_string()));
        directive.explicit = Some(format!("{} c {} h", flight.callsign(), fix.name()));
        directive
    }

    /// Taxi into position on the runway and hold for release
    /// (takeoff clearance with the hold modifier).
    pub fn lineup_wait(flight: &Flight, runway: &Waypoint) -> Self {
        let mut directive =
            Self::new(flight, Instruction::LineupWait, Some(runway.name().to_string()));
        directive.explicit = Some(format!("{} t {} h", flight.callsign(), runway.name()));
        directive
    }

    /// A raw command string passed through untouched (e.g. the session-start
    /// display scaling command, which has no target flight).
    pub fn explicit(command: &str) -> Self {
        Self {
            callsign: String::new(),
            action: Instruction::Destination,
            value: None,
            expedite: false,
            explicit: Some(command.to_string()),
        }
    }

    /// Requests faster-than-normal execution. Only meaningful for altitude
    /// and speed changes; ignored elsewhere.
    pub fn expedited(mut self) -> Self {
        self.expedite = true;
        self
    }

    /// Target callsign, empty for session-level explicit commands.
    pub fn callsign(&self) -> &str { &self.callsign }

    pub fn action(&self) -> Instruction { self.action }

    /// True for commands that bypass the per-flight grammar.
    pub fn is_explicit(&self) -> bool { self.explicit.is_some() }

    /// Compiles the command text submitted to the simulation.
    pub fn command_text(&self) -> String {
        if let Some(explicit) = &self.explicit {
            return explicit.clone();
        }
        let mut parts: Vec<&str> = vec![&self.callsign];
        let code = self.action.code().to_string();
        parts.push(&code);
        if let Some(value) = &self.value {
            parts.push(value);
        }
        if self.expedite && self.action.supports_expedite() {
            parts.push("x");
        }
        parts.join(" ")
    }

    /// The simulation expects altitudes in thousands of feet.
    fn format_altitude(altitude: i32) -> String {
        if altitude > 100 { (altitude / 1000).to_string() } else { altitude.to_string() }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_text())
    }
}
