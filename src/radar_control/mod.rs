pub mod collision_risk;
pub mod common;
pub mod departures;
pub mod directive;
pub mod flight;
pub mod radar_scope;
pub mod route_phase;
pub mod supervisor;
pub mod waypoint;

#[cfg(test)]
pub(crate) mod test_util;

pub use departures::{Departures, TrafficController};
pub use radar_scope::RadarScope;
pub use supervisor::Supervisor;
