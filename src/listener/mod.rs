//! Listener handles and the ordered collections that fire them.
//!
//! A listener is registered on a [`Stat`](crate::Stat) through a handle.
//! The handle is also what identifies the listener when it is registered a
//! second time or removed again.

mod handle;
mod listeners;

pub use handle::{Listener, OnChanged, OnChangedNoArgs};
pub(crate) use listeners::Listeners;
