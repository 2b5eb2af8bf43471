use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Outcome of a clearance submission through the bridge's command box.
#[derive(Debug, serde::Deserialize)]
pub struct CommandResponse {
    accepted: bool,
}

impl SerdeJSONBodyHTTPResponseType for CommandResponse {}

impl CommandResponse {
    pub fn is_accepted(&self) -> bool { self.accepted }
}
