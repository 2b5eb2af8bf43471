pub mod command;
pub mod response_common;
pub mod scope_config;
pub mod telemetry;
