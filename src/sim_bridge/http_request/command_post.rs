use super::super::http_response::command::CommandResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /command endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct CommandRequest {
    /// Rendered clearance text, exactly as typed into the simulation.
    pub(crate) command: String,
}

impl JSONBodyHTTPRequestType for CommandRequest {
    type Body = CommandRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for CommandRequest {
    type Response = CommandResponse;
    fn endpoint(&self) -> &'static str { "/command" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
