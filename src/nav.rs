mod action_bar;
mod frame;
mod stack;

pub use action_bar::{ActionBarStore, ActionDescriptor, ActionVariant};
pub use frame::{Payload, ViewFrame, ViewKind};
pub use stack::NavigationStore;
