use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Session-constant scope data, fetched once at startup.
///
/// Waypoints are 4-element positional arrays (name, type, x, y) with a fifth
/// heading element for runways; aircraft entries are performance triples.
#[derive(Debug, serde::Deserialize)]
pub struct ScopeConfigResponse {
    airfield_elevation: i64,
    waypoints: Vec<Vec<serde_json::Value>>,
    aircraft: Vec<Vec<serde_json::Value>>,
}

impl SerdeJSONBodyHTTPResponseType for ScopeConfigResponse {}

impl ScopeConfigResponse {
    pub fn airfield_elevation(&self) -> i64 { self.airfield_elevation }

    pub fn waypoints(&self) -> &[Vec<serde_json::Value>] { &self.waypoints }

    pub fn aircraft(&self) -> &[Vec<serde_json::Value>] { &self.aircraft }
}
