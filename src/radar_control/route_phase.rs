use super::flight::{Flight, FlightMode, Status};
use super::waypoint::Airport;
use std::fmt;

/// Operational phase of a flight, derived fresh every tick from telemetry.
///
/// Never stored on the flight: the scheduler computes it once per flight per
/// tick and passes it around.
#[derive(Debug, strum_macros::Display, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutePhase {
    /// Aircraft is aborting their takeoff.
    AbortTakeoff,
    /// Aircraft is executing their departure procedure as provided by the controller.
    Departure,
    /// Aircraft has been established on the radar scope for arrival.
    Established,
    /// Aircraft is going around.
    GoAround,
    /// Aircraft is landing on the runway.
    Landing,
    /// Aircraft has left the ground as part of their takeoff procedure.
    Liftoff,
    /// Aircraft is holding in position on their runway awaiting clearance.
    LineupWait,
    /// Aircraft is on approach to the airport (with instructions from the controller).
    OnApproach,
    /// Aircraft is on final to the runway.
    OnFinal,
    /// Aircraft is ready for takeoff but not yet moving.
    ReadyTakeoff,
    /// Aircraft is taking off, rolling down the runway.
    Rolling,
    /// Aircraft is holding at a waypoint.
    HoldWaypoint,
}

impl RoutePhase {
    /// True for phases describing an aircraft under enroute-style control.
    pub fn is_enroute(self) -> bool {
        matches!(self, RoutePhase::Departure | RoutePhase::Established | RoutePhase::HoldWaypoint)
    }

    /// True for phases describing a landing aircraft.
    pub fn is_landing(self) -> bool {
        matches!(self, RoutePhase::Landing | RoutePhase::OnApproach | RoutePhase::OnFinal)
    }

    /// True for phases describing an aircraft on the ground or taking off.
    pub fn is_takeoff(self) -> bool {
        matches!(
            self,
            RoutePhase::ReadyTakeoff
                | RoutePhase::LineupWait
                | RoutePhase::Rolling
                | RoutePhase::Liftoff
        )
    }
}

/// The telemetry decoder produced a mode/status combination this classifier
/// does not know, meaning decoder and classifier have drifted apart. Carries
/// the full field dump of the offending flight; callers must surface it, not
/// default it away.
#[derive(Debug)]
pub struct UnrecognizedStateError {
    callsign: String,
    dump: String,
}

impl UnrecognizedStateError {
    fn new(flight: &Flight) -> Self {
        Self { callsign: flight.callsign().to_string(), dump: format!("{flight:?}") }
    }

    pub fn callsign(&self) -> &str { &self.callsign }
}

impl fmt::Display for UnrecognizedStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized flight state for {}: {}", self.callsign, self.dump)
    }
}

impl std::error::Error for UnrecognizedStateError {}

/// Determines the current [`RoutePhase`] of a flight.
///
/// Pure over the flight's telemetry fields and the airport's field elevation.
/// The table is keyed on the simulation's flight mode and refined by status
/// and altitude; anything the decoder tagged [`FlightMode::Unrecognized`] or
/// [`Status::Unrecognized`] errors out with the flight's field dump.
pub fn determine_phase(
    flight: &Flight,
    airport: &Airport,
) -> Result<RoutePhase, UnrecognizedStateError> {
    let on_field = flight.altitude() == airport.elevation();
    let status = match flight.status() {
        Status::Unrecognized(_) => return Err(UnrecognizedStateError::new(flight)),
        known => known,
    };

    match flight.mode() {
        FlightMode::ApproachRollout => {
            if status == Status::Departure {
                Ok(RoutePhase::Departure)
            } else {
                Ok(RoutePhase::OnApproach)
            }
        }
        FlightMode::FreeFlight => {
            if matches!(status, Status::Departure | Status::Takeoff) {
                Ok(RoutePhase::Departure)
            } else if flight.cleared_destination().is_some() {
                Ok(RoutePhase::OnApproach)
            } else {
                Ok(RoutePhase::Established)
            }
        }
        FlightMode::Intercept => Ok(RoutePhase::OnFinal),
        FlightMode::QueuedTakeoff => {
            if status == Status::Departure {
                Ok(RoutePhase::ReadyTakeoff)
            } else {
                Ok(RoutePhase::Rolling)
            }
        }
        FlightMode::Stack => {
            if status == Status::Departure && on_field {
                Ok(RoutePhase::LineupWait)
            } else {
                Ok(RoutePhase::HoldWaypoint)
            }
        }
        FlightMode::Takeoff => {
            let lined_up_on_runway =
                flight.cleared_destination().is_some_and(|wpt| wpt.is_runway());
            if on_field && lined_up_on_runway {
                Ok(RoutePhase::Rolling)
            } else {
                Ok(RoutePhase::Liftoff)
            }
        }
        FlightMode::Unrecognized(_) => Err(UnrecognizedStateError::new(flight)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar_control::test_util::{FIELD_ELEVATION, airport, fix, flight, runway};

    #[test]
    fn takeoff_mode_on_field_toward_runway_is_rolling() {
        let apt = airport();
        let f = flight(
            "UAL01",
            Status::Takeoff,
            FlightMode::Takeoff,
            FIELD_ELEVATION,
            140,
            Some(runway("27L")),
        );
        assert_eq!(determine_phase(&f, &apt).unwrap(), RoutePhase::Rolling);

        let airborne = flight(
            "UAL01",
            Status::Takeoff,
            FlightMode::Takeoff,
            FIELD_ELEVATION + 300,
            160,
            Some(runway("27L")),
        );
        assert_eq!(determine_phase(&airborne, &apt).unwrap(), RoutePhase::Liftoff);

        let toward_fix =
            flight("UAL01", Status::Takeoff, FlightMode::Takeoff, FIELD_ELEVATION, 140, Some(fix("EXITA")));
        assert_eq!(determine_phase(&toward_fix, &apt).unwrap(), RoutePhase::Liftoff);
    }

    #[test]
    fn stack_mode_splits_on_status_and_field_elevation() {
        let apt = airport();
        let lined_up =
            flight("SWA22", Status::Departure, FlightMode::Stack, FIELD_ELEVATION, 0, None);
        assert_eq!(determine_phase(&lined_up, &apt).unwrap(), RoutePhase::LineupWait);

        let holding_high =
            flight("SWA22", Status::Departure, FlightMode::Stack, FIELD_ELEVATION + 4000, 250, None);
        assert_eq!(determine_phase(&holding_high, &apt).unwrap(), RoutePhase::HoldWaypoint);

        let arrival_stack =
            flight("SWA23", Status::Hold, FlightMode::Stack, FIELD_ELEVATION, 0, None);
        assert_eq!(determine_phase(&arrival_stack, &apt).unwrap(), RoutePhase::HoldWaypoint);
    }

    #[test]
    fn free_flight_splits_on_status_then_clearance() {
        let apt = airport();
        let departing =
            flight("DAL88", Status::Departure, FlightMode::FreeFlight, 5000, 300, None);
        assert_eq!(determine_phase(&departing, &apt).unwrap(), RoutePhase::Departure);

        let after_takeoff =
            flight("DAL88", Status::Takeoff, FlightMode::FreeFlight, 5000, 300, None);
        assert_eq!(determine_phase(&after_takeoff, &apt).unwrap(), RoutePhase::Departure);

        let inbound_cleared =
            flight("ACA11", Status::Arrival, FlightMode::FreeFlight, 9000, 280, Some(fix("INLET")));
        assert_eq!(determine_phase(&inbound_cleared, &apt).unwrap(), RoutePhase::OnApproach);

        let inbound_raw = flight("ACA11", Status::Arrival, FlightMode::FreeFlight, 9000, 280, None);
        assert_eq!(determine_phase(&inbound_raw, &apt).unwrap(), RoutePhase::Established);
    }

    #[test]
    fn remaining_modes_map_directly() {
        let apt = airport();
        let rollout =
            flight("JBU5", Status::Departure, FlightMode::ApproachRollout, FIELD_ELEVATION, 20, None);
        assert_eq!(determine_phase(&rollout, &apt).unwrap(), RoutePhase::Departure);

        let arrival_rollout =
            flight("JBU5", Status::Arrival, FlightMode::ApproachRollout, FIELD_ELEVATION, 20, None);
        assert_eq!(determine_phase(&arrival_rollout, &apt).unwrap(), RoutePhase::OnApproach);

        let intercept = flight("AFR3", Status::Arrival, FlightMode::Intercept, 2200, 170, None);
        assert_eq!(determine_phase(&intercept, &apt).unwrap(), RoutePhase::OnFinal);

        let queued =
            flight("KLM7", Status::Departure, FlightMode::QueuedTakeoff, FIELD_ELEVATION, 0, None);
        assert_eq!(determine_phase(&queued, &apt).unwrap(), RoutePhase::ReadyTakeoff);

        let queued_rolling =
            flight("KLM7", Status::Takeoff, FlightMode::QueuedTakeoff, FIELD_ELEVATION, 90, None);
        assert_eq!(determine_phase(&queued_rolling, &apt).unwrap(), RoutePhase::Rolling);
    }

    #[test]
    fn decoder_drift_surfaces_as_error() {
        let apt = airport();
        let bad_mode =
            flight("XXX1", Status::Departure, FlightMode::Unrecognized(9), FIELD_ELEVATION, 0, None);
        let err = determine_phase(&bad_mode, &apt).unwrap_err();
        assert_eq!(err.callsign(), "XXX1");
        assert!(err.to_string().contains("XXX1"));

        let bad_status =
            flight("XXX2", Status::Unrecognized('Z'), FlightMode::FreeFlight, 3000, 250, None);
        assert!(determine_phase(&bad_status, &apt).is_err());
    }

    #[test]
    fn phase_predicates_partition_the_scheduler_view() {
        assert!(RoutePhase::Departure.is_enroute());
        assert!(RoutePhase::Established.is_enroute());
        assert!(RoutePhase::HoldWaypoint.is_enroute());
        assert!(!RoutePhase::Rolling.is_enroute());

        for phase in [RoutePhase::Landing, RoutePhase::OnApproach, RoutePhase::OnFinal] {
            assert!(phase.is_landing());
            assert!(!phase.is_takeoff());
        }
        for phase in
            [RoutePhase::ReadyTakeoff, RoutePhase::LineupWait, RoutePhase::Rolling, RoutePhase::Liftoff]
        {
            assert!(phase.is_takeoff());
            assert!(!phase.is_enroute());
        }
    }
}
