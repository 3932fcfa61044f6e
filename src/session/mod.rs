/// Runs session transitions against a gateway
pub mod controller;
/// Pure transition function for the session view
pub mod state;

pub use controller::SessionController;
pub use state::{Command, SessionEvent, SessionState, WatchEvent};
