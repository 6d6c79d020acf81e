//! Event bus adapters.
//!
//! - `InMemoryEventBus` - in-process delivery to subscribed handlers

mod in_memory;

pub use in_memory::InMemoryEventBus;
