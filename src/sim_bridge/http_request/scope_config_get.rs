use super::super::http_response::scope_config::ScopeConfigResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the /scope endpoint.
#[derive(Debug)]
pub(crate) struct ScopeConfigRequest {}

impl NoBodyHTTPRequestType for ScopeConfigRequest {}

impl HTTPRequestType for ScopeConfigRequest {
    type Response = ScopeConfigResponse;
    fn endpoint(&self) -> &'static str { "/scope" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
