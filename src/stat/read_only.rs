use std::fmt;

use crate::listener::Listener;
use crate::stat::Stat;

/// A read-only view of a [`Stat<T>`].
///
/// The view borrows the stat, so it can never outlive it. It can read the
/// current and initial values and register listeners, but it has no way to
/// assign: hand it out where outside code should observe a value it does
/// not own.
///
/// # Examples
///
/// ```
/// use statcell::{OnChangedNoArgs, ReadOnlyStat, Stat};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Player {
///     health: Stat<i32>,
/// }
///
/// impl Player {
///     fn health(&self) -> ReadOnlyStat<'_, i32> {
///         self.health.as_read_only()
///     }
/// }
///
/// let player = Player { health: Stat::new(100) };
/// let redraws = Rc::new(Cell::new(0));
///
/// player.health().listen(&OnChangedNoArgs::new({
///     let redraws = redraws.clone();
///     move || redraws.set(redraws.get() + 1)
/// }));
///
/// player.health.set(80);
/// assert_eq!(player.health().get(), 80);
/// assert_eq!(*player.health().initial(), 100);
/// assert_eq!(redraws.get(), 1);
/// ```
///
/// A view cannot assign, reset, or update the stat:
///
/// ```compile_fail
/// use statcell::Stat;
///
/// let stat = Stat::new(0);
/// stat.as_read_only().set(1);
/// ```
///
/// ```compile_fail
/// use statcell::Stat;
///
/// let stat = Stat::new(0);
/// stat.as_read_only().reset();
/// ```
///
/// ```compile_fail
/// use statcell::Stat;
///
/// let stat = Stat::new(0);
/// stat.as_read_only().update(|v| v + 1);
/// ```
pub struct ReadOnlyStat<'a, T> {
    stat: &'a Stat<T>,
}

impl<'a, T> ReadOnlyStat<'a, T> {
    /// Wrap a borrowed stat.
    pub fn new(stat: &'a Stat<T>) -> Self {
        Self { stat }
    }

    /// The value the underlying stat was created with.
    pub fn initial(&self) -> &'a T {
        self.stat.initial()
    }

    /// Read the current value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.stat.with(f)
    }

    /// Register a listener on the underlying stat.
    pub fn listen<L: Listener<T>>(&self, listener: &L) {
        self.stat.listen(listener);
    }

    /// Remove a listener from the underlying stat.
    pub fn stop_listen<L: Listener<T>>(&self, listener: &L) {
        self.stat.stop_listen(listener);
    }

    /// Total number of listeners registered on the underlying stat.
    pub fn listener_count(&self) -> usize {
        self.stat.listener_count()
    }
}

impl<T: Clone> ReadOnlyStat<'_, T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.stat.get()
    }
}

impl<T> Clone for ReadOnlyStat<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReadOnlyStat<'_, T> {}

impl<'a, T> From<&'a Stat<T>> for ReadOnlyStat<'a, T> {
    fn from(stat: &'a Stat<T>) -> Self {
        Self::new(stat)
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyStat<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyStat").field(self.stat).finish()
    }
}
