//! Observable values and their read-only views.
//!
//! - `Stat<T>` - Owns a value, assigns it, and notifies listeners
//! - `ReadOnlyStat<'a, T>` - Borrowed view that can read and listen only

mod read_only;
mod stat;

pub use read_only::ReadOnlyStat;
pub use stat::Stat;
