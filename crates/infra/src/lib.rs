//! Infrastructure layer: command routing, configuration, the line session.

pub mod command_dispatcher;
pub mod config;
pub mod session;

pub use command_dispatcher::{CommandDispatcher, CommandKind, DispatchError, Outcome};
pub use config::{ConfigError, DepotConfig};
pub use session::SessionStats;
