//! Game events and the synchronous event bus.
//!
//! The turn engine notifies front ends (GUI, console, logs) through an
//! explicit publish/subscribe bus instead of depending on them. Delivery is
//! ordered and synchronous: every handler sees every event, in emission
//! order, before the triggering engine call returns. No buffering, no
//! cross-thread delivery, no hidden global dispatcher.

mod bus;
mod event;

pub use bus::{EventBus, SubscriptionId};
pub use event::{GameEvent, JailReason};
