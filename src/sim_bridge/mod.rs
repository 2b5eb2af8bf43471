mod connector;
mod http_client;
pub mod http_request;
pub mod http_response;
pub mod js_value;

pub use connector::{
    BridgeError, CommandSink, RawAircraftSpec, RawFlightRecord, RawScopeConfig, RawTick,
    RawWaypoint, SimBridge, TelemetrySource,
};
