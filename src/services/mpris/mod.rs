/// Message bus abstraction
pub mod bus;
/// Command routing and the event loop
pub mod controller;
/// zbus-backed message bus
pub mod dbus;
/// Media player error types
pub mod error;
/// Controller events and commands
pub mod events;
/// Per-operation player wrapper
pub mod handle;
/// Control interface served on the bus
pub mod interface;
/// Track metadata types
pub mod metadata;
/// D-Bus proxy trait definitions
pub mod proxy;
/// Playing / not-playing classification
pub mod registry;
/// Daemon entry point
pub mod service;
/// Player identifiers, states and bus notifications
pub mod types;

pub use bus::*;
pub use controller::*;
pub use dbus::*;
pub use error::*;
pub use events::*;
pub use handle::*;
pub use interface::*;
pub use metadata::*;
pub use proxy::*;
pub use registry::*;
pub use service::*;
pub use types::*;

#[cfg(test)]
mod tests;
