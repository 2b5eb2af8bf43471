use super::common::Vec2D;
use std::fmt;
use std::sync::Arc;
use strum_macros::Display;

/// Navigational fix categories known to the simulation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum WaypointType {
    Runway,
    Vor,
    Intersection,
}

impl WaypointType {
    /// Maps the raw numeric type indicator from the scope config.
    pub fn from_raw(value: i64) -> Option<Self> {
        match value {
            0 => Some(WaypointType::Runway),
            1 => Some(WaypointType::Vor),
            2 => Some(WaypointType::Intersection),
            _ => None,
        }
    }
}

/// A named navigational fix on the radar scope.
///
/// The full set is fetched once at session start and never changes; flights
/// reference waypoints through `Arc` handles.
#[derive(Debug)]
pub struct Waypoint {
    name: String,
    wp_type: WaypointType,
    pos: Vec2D<f64>,
    /// Magnetic heading, present for runways only.
    heading: Option<i32>,
}

impl Waypoint {
    pub fn new(name: String, wp_type: WaypointType, pos: Vec2D<f64>, heading: Option<i32>) -> Self {
        Self { name, wp_type, pos, heading }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn wp_type(&self) -> WaypointType { self.wp_type }

    pub fn pos(&self) -> Vec2D<f64> { self.pos }

    pub fn heading(&self) -> Option<i32> { self.heading }

    pub fn is_runway(&self) -> bool { self.wp_type == WaypointType::Runway }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.wp_type)
    }
}

/// The airfield this session controls: the altitude datum for every
/// "above field" comparison plus the runway waypoints in scope order.
#[derive(Debug)]
pub struct Airport {
    elevation: i32,
    runways: Vec<Arc<Waypoint>>,
}

impl Airport {
    pub fn new(elevation: i32, runways: Vec<Arc<Waypoint>>) -> Self {
        Self { elevation, runways }
    }

    /// Field elevation in feet.
    pub fn elevation(&self) -> i32 { self.elevation }

    pub fn runways(&self) -> &[Arc<Waypoint>] { &self.runways }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_type_indicators_map_to_variants() {
        assert_eq!(WaypointType::from_raw(0), Some(WaypointType::Runway));
        assert_eq!(WaypointType::from_raw(1), Some(WaypointType::Vor));
        assert_eq!(WaypointType::from_raw(2), Some(WaypointType::Intersection));
        assert_eq!(WaypointType::from_raw(7), None);
    }
}
