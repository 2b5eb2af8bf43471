use super::flight::Flight;
use super::route_phase::RoutePhase;
use strum_macros::Display;

/// Minimum vertical separation of aircraft (feet).
pub const VERTICAL_SEPARATION_MIN_FT: i32 = 1000;
/// Minimum lateral separation of aircraft in scope pixels
/// (3 mi at the default 10 px/mi scope scale).
pub const LATERAL_SEPARATION_MIN_PX: f64 = 30.0;

/// Collision risk scale.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CollisionRiskScale {
    /// No conflict present.
    NoRisk,
    /// Current risk exists but should clear assuming no changes in clearance.
    LowRisk,
    /// Risks are likely to be realized based on clearances, assuming no change.
    MedRisk,
    /// Current conflict is present in the simulation.
    HighRisk,
}

/// Criteria used to determine the exact posed risk.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRiskCriteria {
    ClearedAltitude,
    CurrentAltitude,
    ClearedHeading,
    Proximity,
}

/// Conflict detail for one ordered flight pair.
#[derive(Debug)]
pub struct CollisionRisk {
    source: String,
    target: String,
    risk: CollisionRiskScale,
    /// Altitude difference in relation to the source flight (feet).
    vertical_separation: i32,
    /// Lateral distance between the flights (scope pixels).
    distance: f64,
    factors: Vec<CollisionRiskCriteria>,
}

impl CollisionRisk {
    pub fn source(&self) -> &str { &self.source }

    pub fn target(&self) -> &str { &self.target }

    pub fn risk(&self) -> CollisionRiskScale { self.risk }

    pub fn vertical_separation(&self) -> i32 { self.vertical_separation }

    pub fn distance(&self) -> f64 { self.distance }

    pub fn factors(&self) -> &[CollisionRiskCriteria] { &self.factors }
}

/// Scores the proximity/altitude conflict between two flights.
///
/// Phases come from the scheduler's per-tick classification pass; landing and
/// takeoff phases always score [`CollisionRiskScale::NoRisk`] because their
/// close-quarters geometry is expected, not a conflict. The lateral distance
/// is the caller's scope-geometry value (`RadarScope::distance`), so the
/// pixel thresholds here stay aligned with the simulation's own math.
///
/// With the simulation's own conflict warning set on the source, the strict
/// minima apply and matches raise `HighRisk`; without it, doubled minima
/// flag `LowRisk` lookahead conflicts. Factors accumulate independently and
/// the risk level never downgrades.
pub fn calculate_risk(
    source: &Flight,
    target: &Flight,
    source_phase: RoutePhase,
    target_phase: RoutePhase,
    distance: f64,
) -> CollisionRisk {
    let mut risk = CollisionRisk {
        source: source.callsign().to_string(),
        target: target.callsign().to_string(),
        risk: CollisionRiskScale::NoRisk,
        vertical_separation: source.altitude() - target.altitude(),
        distance,
        factors: Vec::new(),
    };

    // These categories of phases do not impact collision risk as seen by the simulation.
    let exempt = source_phase.is_landing()
        || target_phase.is_landing()
        || source_phase.is_takeoff()
        || target_phase.is_takeoff();
    if exempt {
        return risk;
    }

    if source.conflict_warning() {
        if risk.vertical_separation.abs() <= VERTICAL_SEPARATION_MIN_FT {
            risk.factors.push(CollisionRiskCriteria::CurrentAltitude);
            risk.risk = CollisionRiskScale::HighRisk;
        }
        if risk.distance <= LATERAL_SEPARATION_MIN_PX {
            risk.factors.push(CollisionRiskCriteria::Proximity);
            risk.risk = CollisionRiskScale::HighRisk;
        }
    } else {
        if risk.vertical_separation.abs() <= VERTICAL_SEPARATION_MIN_FT * 2 {
            risk.factors.push(CollisionRiskCriteria::ClearedAltitude);
            risk.risk = CollisionRiskScale::LowRisk;
        }
        if risk.distance <= LATERAL_SEPARATION_MIN_PX * 2.0 {
            risk.factors.push(CollisionRiskCriteria::Proximity);
            risk.risk = CollisionRiskScale::LowRisk;
        }
    }

    risk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar_control::flight::{FlightMode, Status};
    use crate::radar_control::test_util::FlightBuilder;

    fn enroute(callsign: &str, altitude: i32) -> crate::radar_control::flight::Flight {
        FlightBuilder::new(callsign)
            .status(Status::Departure)
            .mode(FlightMode::FreeFlight)
            .altitude(altitude)
            .speed(290)
            .build()
    }

    #[test]
    fn takeoff_and_landing_phases_are_always_no_risk() {
        let a = enroute("AAL1", 5000);
        let b = enroute("AAL2", 5000);
        for phase in [
            RoutePhase::Landing,
            RoutePhase::OnApproach,
            RoutePhase::OnFinal,
            RoutePhase::ReadyTakeoff,
            RoutePhase::LineupWait,
            RoutePhase::Rolling,
            RoutePhase::Liftoff,
        ] {
            let risk = calculate_risk(&a, &b, phase, RoutePhase::Departure, 0.0);
            assert_eq!(risk.risk(), CollisionRiskScale::NoRisk, "source phase {phase}");
            assert!(risk.factors().is_empty());

            let risk = calculate_risk(&a, &b, RoutePhase::Departure, phase, 0.0);
            assert_eq!(risk.risk(), CollisionRiskScale::NoRisk, "target phase {phase}");
        }
    }

    #[test]
    fn conflict_warning_with_tight_vertical_separation_is_high_risk() {
        let source = FlightBuilder::new("UAL10")
            .status(Status::Departure)
            .mode(FlightMode::FreeFlight)
            .altitude(6900)
            .conflict_warning(true)
            .build();
        let target = enroute("UAL20", 6000);

        let risk =
            calculate_risk(&source, &target, RoutePhase::Departure, RoutePhase::Departure, 500.0);
        assert_eq!(risk.risk(), CollisionRiskScale::HighRisk);
        assert_eq!(risk.vertical_separation(), 900);
        assert!(risk.factors().contains(&CollisionRiskCriteria::CurrentAltitude));
        assert!(!risk.factors().contains(&CollisionRiskCriteria::Proximity));
    }

    #[test]
    fn conflict_warning_factors_accumulate() {
        let source = FlightBuilder::new("UAL10")
            .status(Status::Departure)
            .mode(FlightMode::FreeFlight)
            .altitude(6000)
            .conflict_warning(true)
            .build();
        let target = enroute("UAL20", 6000);

        let risk = calculate_risk(
            &source,
            &target,
            RoutePhase::Departure,
            RoutePhase::Established,
            LATERAL_SEPARATION_MIN_PX,
        );
        assert_eq!(risk.risk(), CollisionRiskScale::HighRisk);
        assert_eq!(
            risk.factors(),
            &[CollisionRiskCriteria::CurrentAltitude, CollisionRiskCriteria::Proximity]
        );
    }

    #[test]
    fn without_warning_loose_thresholds_flag_low_risk() {
        let source = enroute("BAW9", 7500);
        let target = enroute("BAW10", 6000);

        // 1500 ft is inside the doubled vertical minimum, distance inside 2x lateral
        let risk = calculate_risk(
            &source,
            &target,
            RoutePhase::Departure,
            RoutePhase::Departure,
            LATERAL_SEPARATION_MIN_PX * 1.5,
        );
        assert_eq!(risk.risk(), CollisionRiskScale::LowRisk);
        assert_eq!(
            risk.factors(),
            &[CollisionRiskCriteria::ClearedAltitude, CollisionRiskCriteria::Proximity]
        );
    }

    #[test]
    fn wide_separation_without_warning_is_no_risk() {
        let source = enroute("BAW9", 11000);
        let target = enroute("BAW10", 6000);
        let risk =
            calculate_risk(&source, &target, RoutePhase::Departure, RoutePhase::Departure, 400.0);
        assert_eq!(risk.risk(), CollisionRiskScale::NoRisk);
        assert!(risk.factors().is_empty());
    }
}
