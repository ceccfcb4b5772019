/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports describe what the application core needs from the
/// outside world: record data, rendering, output and progress display.
pub mod outbound;
