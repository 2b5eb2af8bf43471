use super::http_client::HTTPClient;
use super::http_request::command_post::CommandRequest;
use super::http_request::request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType};
use super::http_request::scope_config_get::ScopeConfigRequest;
use super::http_request::telemetry_get::TelemetryRequest;
use super::http_response::response_common::ResponseError;
use super::js_value::{self, DecodeError};
use crate::warn;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use strum_macros::Display;

/// One decoded flight record: the simulation's 20 positional fields, typed.
#[derive(Debug, Clone)]
pub struct RawFlightRecord {
    pub aircraft: String,
    pub model_index: usize,
    pub x: f64,
    pub y: f64,
    pub altitude: i32,
    pub heading: i32,
    pub speed: i32,
    pub flight_mode: i64,
    pub heading_clearance: i32,
    pub altitude_clearance: i32,
    pub speed_clearance: i32,
    pub nav_clearance: String,
    pub nav_clearance_id: i64,
    pub destination_index: usize,
    pub turn: i64,
    pub timer_seconds: i64,
    pub timer_mode: char,
    pub expedite: bool,
    pub conflict: bool,
    pub airline: String,
}

impl RawFlightRecord {
    /// Decodes one positional array; field order is the site's raw
    /// plane-record layout.
    fn decode(values: &[Value]) -> Result<Self, DecodeError> {
        Ok(Self {
            aircraft: js_value::as_str(values, 0)?.to_string(),
            model_index: js_value::as_usize(values, 1)?,
            x: js_value::as_f64(values, 2)?,
            y: js_value::as_f64(values, 3)?,
            altitude: js_value::as_i32(values, 4)?,
            heading: js_value::as_i32(values, 5)?,
            speed: js_value::as_i32(values, 6)?,
            flight_mode: js_value::as_i64(values, 7)?,
            heading_clearance: js_value::as_i32(values, 8)?,
            altitude_clearance: js_value::as_i32(values, 9)?,
            speed_clearance: js_value::as_i32(values, 10)?,
            nav_clearance: js_value::as_str(values, 11)?.to_string(),
            nav_clearance_id: js_value::as_i64(values, 12)?,
            destination_index: js_value::as_usize(values, 13)?,
            turn: js_value::as_i64(values, 14)?,
            timer_seconds: js_value::as_i64(values, 15)?,
            timer_mode: js_value::as_char(values, 16)?,
            expedite: js_value::as_bool(values, 17)?,
            conflict: js_value::as_bool(values, 18)?,
            airline: js_value::as_str(values, 19)?.to_string(),
        })
    }
}

/// One tick's worth of decoded scope state.
///
/// A `None` flight record is an aircraft the simulation is still loading;
/// consumers skip it and pick the aircraft up on a later tick.
#[derive(Debug, Default)]
pub struct RawTick {
    pub wind_heading: i32,
    pub active_runways: Vec<usize>,
    pub flights: HashMap<String, Option<RawFlightRecord>>,
}

/// One waypoint row from the scope config (heading only for runways).
#[derive(Debug, Clone)]
pub struct RawWaypoint {
    pub name: String,
    pub wp_type: i64,
    pub x: f64,
    pub y: f64,
    pub heading: Option<i32>,
}

/// One aircraft-model performance triple from the scope config.
#[derive(Debug, Clone, Copy)]
pub struct RawAircraftSpec {
    pub cruise_speed: i32,
    pub liftoff_speed: i32,
    pub approach_speed: i32,
}

/// Session-constant scope data.
#[derive(Debug)]
pub struct RawScopeConfig {
    pub airfield_elevation: i32,
    pub waypoints: Vec<RawWaypoint>,
    pub aircraft: Vec<RawAircraftSpec>,
}

#[derive(Debug, Display)]
pub enum BridgeError {
    /// Transport or server-side failure talking to the bridge.
    Http(ResponseError),
    /// The bridge answered but the payload does not match the known layout.
    Decode(DecodeError),
    /// The simulation refused the submitted command text.
    Rejected(String),
}

impl std::error::Error for BridgeError {}

impl From<ResponseError> for BridgeError {
    fn from(value: ResponseError) -> Self { BridgeError::Http(value) }
}

impl From<DecodeError> for BridgeError {
    fn from(value: DecodeError) -> Self { BridgeError::Decode(value) }
}

/// Per-tick raw state supplier. Owned by the radar scope; exactly one
/// component talks to it.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<RawTick, BridgeError>;
    async fn fetch_scope_config(&self) -> Result<RawScopeConfig, BridgeError>;
}

/// Accepts rendered clearance text for submission to the simulation.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn submit(&self, command_text: &str) -> Result<(), BridgeError>;
}

/// HTTP binding of both interfaces against the sim bridge.
#[derive(Debug)]
pub struct SimBridge {
    client: HTTPClient,
}

impl SimBridge {
    pub fn new(base_url: &str) -> Self { Self { client: HTTPClient::new(base_url) } }
}

#[async_trait]
impl TelemetrySource for SimBridge {
    async fn fetch_snapshot(&self) -> Result<RawTick, BridgeError> {
        let response = TelemetryRequest {}.send_request(&self.client).await?;
        let wind_heading = i32::try_from(response.wind_heading()).unwrap_or(0);
        let active_runways = response
            .active_runways()
            .iter()
            .filter_map(|&idx| usize::try_from(idx).ok())
            .collect();

        let mut flights = HashMap::new();
        for (callsign, record) in response.into_flights() {
            match record {
                None => {
                    flights.insert(callsign, None);
                }
                Some(values) => match RawFlightRecord::decode(&values) {
                    Ok(decoded) => {
                        flights.insert(callsign, Some(decoded));
                    }
                    // A record the layout cannot explain is dropped here; the
                    // scope keeps the aircraft's previous state for the tick.
                    Err(err) => warn!("Dropping undecodable record for {callsign}: {err}"),
                },
            }
        }

        Ok(RawTick { wind_heading, active_runways, flights })
    }

    async fn fetch_scope_config(&self) -> Result<RawScopeConfig, BridgeError> {
        let response = ScopeConfigRequest {}.send_request(&self.client).await?;

        let mut waypoints = Vec::with_capacity(response.waypoints().len());
        for row in response.waypoints() {
            // Runways carry a fifth element: the runway heading.
            let heading =
                if row.len() == 5 { Some(js_value::as_i32(row, 4)?) } else { None };
            waypoints.push(RawWaypoint {
                name: js_value::as_str(row, 0)?.to_string(),
                wp_type: js_value::as_i64(row, 1)?,
                x: js_value::as_f64(row, 2)?,
                y: js_value::as_f64(row, 3)?,
                heading,
            });
        }

        let mut aircraft = Vec::with_capacity(response.aircraft().len());
        for row in response.aircraft() {
            aircraft.push(RawAircraftSpec {
                cruise_speed: js_value::as_i32(row, 0)?,
                liftoff_speed: js_value::as_i32(row, 1)?,
                approach_speed: js_value::as_i32(row, 2)?,
            });
        }

        Ok(RawScopeConfig {
            airfield_elevation: i32::try_from(response.airfield_elevation()).unwrap_or(0),
            waypoints,
            aircraft,
        })
    }
}

#[async_trait]
impl CommandSink for SimBridge {
    async fn submit(&self, command_text: &str) -> Result<(), BridgeError> {
        let request = CommandRequest { command: command_text.to_string() };
        let response = request.send_request(&self.client).await?;
        if response.is_accepted() {
            Ok(())
        } else {
            Err(BridgeError::Rejected(command_text.to_string()))
        }
    }
}
