use super::response_common::SerdeJSONBodyHTTPResponseType;
use std::collections::HashMap;

/// One tick of raw scope state as republished by the bridge.
///
/// Flight records arrive as the simulation's positional arrays, untyped; a
/// `null` record is an aircraft the simulation is still loading.
#[derive(Debug, serde::Deserialize)]
pub struct TelemetryResponse {
    wind_heading: i64,
    active_runways: Vec<i64>,
    flights: HashMap<String, Option<Vec<serde_json::Value>>>,
}

impl SerdeJSONBodyHTTPResponseType for TelemetryResponse {}

impl TelemetryResponse {
    pub fn wind_heading(&self) -> i64 { self.wind_heading }

    pub fn active_runways(&self) -> &[i64] { &self.active_runways }

    pub fn into_flights(self) -> HashMap<String, Option<Vec<serde_json::Value>>> { self.flights }
}
