mod bus;
mod events;

pub use bus::EventBus;
pub use events::EngineEvent;

/// Receives engine notifications. Delivery is synchronous and in
/// subscription order; handlers run before the emitting operation returns.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EngineEvent);
}
