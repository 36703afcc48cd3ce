//! # Statcell
//!
//! Observable value cells for game and application state.
//!
//! A [`Stat<T>`] holds a value, remembers the value it started with, and
//! synchronously notifies its listeners every time it is assigned. A
//! [`ReadOnlyStat<'a, T>`] borrows a stat and exposes reading and listening
//! without assignment, so an owner can keep the stat private and hand out
//! views.
//!
//! ## Listeners
//!
//! Listeners are registered through handles:
//! - [`OnChanged<T>`] - Called with the old and the new value
//! - [`OnChangedNoArgs`] - Called with nothing
//!
//! A handle is the listener's identity. Registering the same handle again
//! keeps a single registration; removing a handle that was never registered
//! does nothing.
//!
//! ## Notification order and reentrancy
//!
//! On each assignment, `OnChanged` listeners run first and `OnChangedNoArgs`
//! listeners second, each group in registration order. Listeners may touch
//! the stat that is notifying them:
//! - A listener removed by an earlier listener of the same pass is skipped.
//! - A listener added during a pass first runs on the next assignment.
//! - Assigning from a listener runs a complete nested pass before the outer
//!   pass continues with its own old and new values.
//!
//! ## Logging
//!
//! Registration changes and assignments emit `trace` level events through
//! [`tracing`]. Install a subscriber to see them.
//!
//! ```
//! use statcell::{OnChanged, Stat};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let score = Stat::new(0);
//! let last_delta = Rc::new(Cell::new(0));
//!
//! score.listen(&OnChanged::new({
//!     let last_delta = last_delta.clone();
//!     move |old: &i32, new: &i32| last_delta.set(new - old)
//! }));
//!
//! score.update(|s| s + 15);
//! assert_eq!(score.get(), 15);
//! assert_eq!(last_delta.get(), 15);
//! ```

pub mod listener;
pub mod stat;

// Re-export main types for convenience
pub use listener::{Listener, OnChanged, OnChangedNoArgs};
pub use stat::{ReadOnlyStat, Stat};
