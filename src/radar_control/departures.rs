use super::collision_risk::{self, CollisionRiskScale};
use super::directive::Directive;
use super::radar_scope::RadarScope;
use super::route_phase::{self, RoutePhase, UnrecognizedStateError};
use crate::{dep, twr, warn};
use itertools::Itertools;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// A controller consumes the refreshed scope once per tick and enqueues
/// directives on it. The supervisor drains the queue afterwards.
pub trait TrafficController {
    fn do_routing(&mut self, scope: &mut RadarScope) -> Result<(), UnrecognizedStateError>;
}

/// The departure controller: sequences takeoffs out of the airfield.
///
/// Keeps three pieces of state across ticks: the FIFO takeoff queue, the
/// runway reservation table, and the callsign currently cleared for takeoff.
/// Everything else is re-derived from the scope every tick.
pub struct Departures {
    /// Flights queued for takeoff, by callsign, in the order they became ready.
    takeoff_queue: VecDeque<String>,
    /// Runway name to the callsign holding in position on it.
    runway_reservations: HashMap<String, String>,
    /// Current flight that's taking off.
    current_takeoff: Option<String>,
}

impl Departures {
    /// Altitude above field a departing flight must clear before the next release (ft).
    const TAKEOFF_SEPARATION_FT: i32 = 500;
    /// Initial climb-out altitude for released departures (ft).
    const TAKEOFF_ALTITUDE_FT: i32 = 7000;
    /// Altitude above field at which a holding departure is handed off to enroute control (ft).
    const HANDOFF_MIN_ALTITUDE_FT: i32 = 4000;
    /// Groundspeed beyond which a reservation holder counts as rolling (kts).
    const ROLLING_SPEED_KT: i32 = 30;

    pub fn new() -> Self {
        Self {
            takeoff_queue: VecDeque::new(),
            runway_reservations: HashMap::new(),
            current_takeoff: None,
        }
    }

    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.takeoff_queue.iter().map(String::as_str)
    }

    pub fn current_takeoff(&self) -> Option<&str> { self.current_takeoff.as_deref() }

    pub fn reservation(&self, runway: &str) -> Option<&str> {
        self.runway_reservations.get(runway).map(String::as_str)
    }

    /// Classifies every flight exactly once for this tick.
    fn classify(
        &self,
        scope: &RadarScope,
    ) -> Result<HashMap<String, RoutePhase>, UnrecognizedStateError> {
        let mut phases = HashMap::with_capacity(scope.flights().len());
        for (callsign, flight) in scope.flights() {
            let phase = route_phase::determine_phase(flight, scope.airport())?;
            phases.insert(callsign.clone(), phase);
        }
        Ok(phases)
    }

    /// Appends newly ready flights to the takeoff queue and purges queue
    /// entries whose aircraft have gone off radar.
    fn update_queue(&mut self, scope: &RadarScope, phases: &HashMap<String, RoutePhase>) {
        self.takeoff_queue.retain(|callsign| {
            let on_scope = scope.flights().contains_key(callsign);
            if !on_scope {
                warn!("{callsign} left the scope while queued for takeoff");
            }
            on_scope
        });

        // Scan order is fixed so simultaneous arrivals queue deterministically.
        for callsign in scope.flights().keys().sorted() {
            if phases[callsign] == RoutePhase::ReadyTakeoff
                && !self.takeoff_queue.iter().any(|queued| queued == callsign)
            {
                self.takeoff_queue.push_back(callsign.clone());
                dep!("{callsign} queued for takeoff (number {} in queue)", self.takeoff_queue.len());
            }
        }
    }

    /// Routes airborne departures: hands off flights that climbed through the
    /// handoff gate while holding, and parks the rest in a holding pattern at
    /// their exit fix until they do.
    fn route_enroute(&mut self, scope: &mut RadarScope, phases: &HashMap<String, RoutePhase>) {
        let mut directives = Vec::new();
        for callsign in scope.flights().keys().sorted() {
            let flight = &scope.flights()[callsign];
            let phase = phases[callsign];
            if !phase.is_enroute() {
                continue;
            }
            let above_field = flight.altitude() - scope.airport().elevation();
            if phase == RoutePhase::HoldWaypoint && above_field > Self::HANDOFF_MIN_ALTITUDE_FT {
                dep!("{callsign} through handoff gate, resuming own navigation to {}",
                    flight.destination().name());
                directives.push(Directive::change_destination(flight, flight.destination()));
            } else if flight.cleared_destination().is_none_or(|wpt| wpt.is_runway()) {
                dep!("{callsign} holding at {} pending handoff", flight.destination().name());
                directives.push(Directive::hold(flight, flight.destination()));
            }
        }
        for directive in directives {
            scope.add_directive(directive);
        }
    }

    /// True once the previous departure has cleared the separation gate.
    fn safe_to_takeoff(&self, scope: &RadarScope) -> bool {
        match &self.current_takeoff {
            Some(callsign) => match scope.flight(callsign) {
                Some(flight) => {
                    flight.altitude() - scope.airport().elevation() > Self::TAKEOFF_SEPARATION_FT
                }
                None => {
                    warn!("{callsign} left the scope mid-departure, treating separation as met");
                    true
                }
            },
            None => true,
        }
    }

    /// Releases the next queued departure once separation allows it.
    fn release_next(&mut self, scope: &mut RadarScope) {
        if !self.safe_to_takeoff(scope) {
            return;
        }
        self.current_takeoff = None;
        while let Some(next) = self.takeoff_queue.pop_front() {
            let Some(flight) = scope.flight(&next) else {
                warn!("{next} left the scope before release, skipping");
                continue;
            };
            let climb = Directive::change_altitude(flight, Self::TAKEOFF_ALTITUDE_FT);
            let takeoff = Directive::takeoff(flight);
            self.current_takeoff = Some(next.clone());
            dep!("{next} cleared for takeoff ({} still queued)", self.takeoff_queue.len());
            scope.add_directive(climb);
            scope.add_directive(takeoff);
            break;
        }
    }

    /// Drops reservations whose holders have begun their takeoff roll.
    fn release_reservations(&mut self, scope: &RadarScope) {
        self.runway_reservations.retain(|runway, holder| match scope.flight(holder) {
            Some(flight) if flight.speed() > Self::ROLLING_SPEED_KT => {
                dep!("{holder} rolling on {runway}, reservation released");
                false
            }
            Some(_) => true,
            None => {
                warn!("{holder} left the scope while holding {runway}");
                false
            }
        });
    }

    /// Grants lineup-and-wait to queued flights whose runway is free.
    fn grant_lineups(&mut self, scope: &mut RadarScope) {
        let mut directives = Vec::new();
        for callsign in &self.takeoff_queue {
            let Some(flight) = scope.flight(callsign) else {
                continue;
            };
            let Some(runway) =
                flight.cleared_destination().filter(|wpt| wpt.is_runway()).map(Arc::clone)
            else {
                continue;
            };
            if self.runway_reservations.contains_key(runway.name()) {
                continue;
            }
            self.runway_reservations.insert(runway.name().to_string(), callsign.clone());
            dep!("{callsign} lining up on {}", runway.name());
            directives.push(Directive::lineup_wait(flight, &runway));
        }
        for directive in directives {
            scope.add_directive(directive);
        }
    }

    /// Advisory pass: score every flight pair and log live conflicts.
    fn scan_conflicts(&self, scope: &RadarScope, phases: &HashMap<String, RoutePhase>) {
        for (a, b) in
            scope.flights().values().sorted_by_key(|f| f.callsign().to_string()).tuple_combinations()
        {
            let risk = collision_risk::calculate_risk(
                a,
                b,
                phases[a.callsign()],
                phases[b.callsign()],
                scope.distance(a, b),
            );
            if risk.risk() == CollisionRiskScale::HighRisk {
                twr!(
                    "Conflict {} / {}: {:.0} px lateral, {} ft vertical ({:?})",
                    risk.source(),
                    risk.target(),
                    risk.distance(),
                    risk.vertical_separation(),
                    risk.factors()
                );
            }
        }
    }
}

impl Default for Departures {
    fn default() -> Self { Self::new() }
}

impl TrafficController for Departures {
    /// One scheduling pass. Step order is load-bearing: routing before queue
    /// release before reservation cleanup before new lineup grants, with all
    /// directives landing on the scope's queue in that order.
    fn do_routing(&mut self, scope: &mut RadarScope) -> Result<(), UnrecognizedStateError> {
        let phases = self.classify(scope)?;
        self.update_queue(scope, &phases);
        self.route_enroute(scope, &phases);
        self.release_next(scope);
        self.release_reservations(scope);
        self.grant_lineups(scope);
        self.scan_conflicts(scope, &phases);
        Ok(())
    }
}
