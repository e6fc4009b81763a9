pub mod command;
pub mod debug;
pub mod notifier;
pub mod pending_queue;
pub mod registry;
pub mod timer;
