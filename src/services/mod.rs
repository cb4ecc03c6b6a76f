/// MPRIS player registry, command routing and bus plumbing
pub mod mpris;

pub use mpris::{Controller, ControllerService, MessageBus, PlayerRegistry, ZbusBus};
