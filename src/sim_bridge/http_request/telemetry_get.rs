use super::super::http_response::telemetry::TelemetryResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the /telemetry endpoint.
#[derive(Debug)]
pub(crate) struct TelemetryRequest {}

impl NoBodyHTTPRequestType for TelemetryRequest {}

impl HTTPRequestType for TelemetryRequest {
    type Response = TelemetryResponse;
    fn endpoint(&self) -> &'static str { "/telemetry" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
