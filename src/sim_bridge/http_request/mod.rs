pub mod command_post;
pub mod request_common;
pub mod scope_config_get;
pub mod telemetry_get;
