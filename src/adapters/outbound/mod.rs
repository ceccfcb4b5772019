/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod network;
pub mod payload;
mod routing_record_source;

pub use routing_record_source::RoutingRecordSource;
