/// Use cases module containing application business logic orchestration
mod browse_packages;

pub use browse_packages::{BrowseSession, LoadOutcome, LoadTicket};
