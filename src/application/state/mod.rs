/// Table state owned by a browsing session
///
/// The state is a plain value; every change goes through [`ViewState::apply`].
mod view_state;

pub use view_state::{LoadStatus, ViewEvent, ViewState};
