use std::cell::RefCell;
use std::fmt;

use tracing::trace;

use crate::listener::{Listener, Listeners};
use crate::stat::ReadOnlyStat;

/// An observable value that notifies listeners every time it is assigned.
///
/// A `Stat` remembers the value it was created with, so it can be
/// [`reset`](Stat::reset) later. Every [`set`](Stat::set) fires the
/// registered listeners synchronously before returning, even when the new
/// value equals the old one.
///
/// Two kinds of listener exist: [`OnChanged`](crate::OnChanged) receives
/// `(old, new)`, [`OnChangedNoArgs`](crate::OnChangedNoArgs) receives
/// nothing. On each assignment all `OnChanged` listeners run first, then
/// all `OnChangedNoArgs` listeners, each group in registration order.
///
/// `Stat` is single-threaded: it is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// use statcell::{OnChanged, Stat};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let health = Stat::new(10);
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let on_changed = OnChanged::new({
///     let log = log.clone();
///     move |old: &i32, new: &i32| log.borrow_mut().push((*old, *new))
/// });
/// health.listen(&on_changed);
///
/// health.set(20);
/// assert_eq!(*log.borrow(), vec![(10, 20)]);
/// assert_eq!(health.get(), 20);
///
/// health.stop_listen(&on_changed);
/// health.set(30);
/// assert_eq!(log.borrow().len(), 1);
///
/// health.reset();
/// assert_eq!(health.get(), 10);
/// ```
pub struct Stat<T> {
    initial: T,
    current: RefCell<T>,
    on_changed: Listeners<dyn Fn(&T, &T)>,
    on_changed_no_args: Listeners<dyn Fn()>,
}

impl<T: Clone> Stat<T> {
    /// Create a new stat holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            current: RefCell::new(initial.clone()),
            initial,
            on_changed: Listeners::new("on_changed"),
            on_changed_no_args: Listeners::new("on_changed_no_args"),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.current.borrow().clone()
    }

    /// Assign a new value and notify every listener.
    ///
    /// Listeners run even if `new_value` equals the current value. They may
    /// register or remove listeners, or set this stat again; see the crate
    /// docs for how those cases behave.
    pub fn set(&self, new_value: T) {
        let old_value = self.current.replace(new_value.clone());

        trace!(
            on_changed = self.on_changed.len(),
            on_changed_no_args = self.on_changed_no_args.len(),
            "stat set"
        );

        self.on_changed.fire(|callback| callback(&old_value, &new_value));
        self.on_changed_no_args.fire(|callback| callback());
    }

    /// Assign the initial value again. Notifies like [`set`](Stat::set).
    pub fn reset(&self) {
        self.set(self.initial.clone());
    }

    /// Compute the next value from the current one and [`set`](Stat::set) it.
    ///
    /// `f` works on a clone, so it may assign to this stat itself; its
    /// return value is still assigned afterwards.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.get());
        self.set(next);
    }
}

impl<T> Stat<T> {
    /// The value this stat was created with.
    pub fn initial(&self) -> &T {
        &self.initial
    }

    /// Read the current value with a function without cloning.
    ///
    /// # Panics
    ///
    /// Panics if `f` assigns to this same stat, since the value is borrowed
    /// for the duration of the call.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let current = self.current.borrow();
        f(&*current)
    }

    /// Register a listener.
    ///
    /// Registering a handle that is already registered does not add it
    /// twice; it moves to the end of the notification order instead.
    pub fn listen<L: Listener<T>>(&self, listener: &L) {
        listener.attach(self);
    }

    /// Remove a listener. Does nothing if it is not registered.
    pub fn stop_listen<L: Listener<T>>(&self, listener: &L) {
        listener.detach(self);
    }

    /// Total number of registered listeners of both kinds.
    pub fn listener_count(&self) -> usize {
        self.on_changed.len() + self.on_changed_no_args.len()
    }

    /// Borrow a view that can read and listen but not assign.
    pub fn as_read_only(&self) -> ReadOnlyStat<'_, T> {
        ReadOnlyStat::new(self)
    }

    pub(crate) fn on_changed(&self) -> &Listeners<dyn Fn(&T, &T)> {
        &self.on_changed
    }

    pub(crate) fn on_changed_no_args(&self) -> &Listeners<dyn Fn()> {
        &self.on_changed_no_args
    }
}

impl<T: Clone + Default> Default for Stat<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> From<T> for Stat<T> {
    fn from(initial: T) -> Self {
        Self::new(initial)
    }
}

impl<T: fmt::Debug> fmt::Debug for Stat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stat")
            .field("initial", &self.initial)
            .field("current", &*self.current.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{OnChanged, OnChangedNoArgs};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(log: &Log, tag: &'static str) -> OnChanged<i32> {
        let log = log.clone();
        OnChanged::new(move |old: &i32, new: &i32| {
            log.borrow_mut().push(format!("{tag}:{old}->{new}"));
        })
    }

    fn pinger(log: &Log, tag: &'static str) -> OnChangedNoArgs {
        let log = log.clone();
        OnChangedNoArgs::new(move || log.borrow_mut().push(tag.to_string()))
    }

    #[test]
    fn new_sets_initial_and_current() {
        let stat = Stat::new(7);
        assert_eq!(stat.get(), 7);
        assert_eq!(*stat.initial(), 7);
        assert_eq!(stat.listener_count(), 0);
    }

    #[test]
    fn set_fires_even_when_value_is_unchanged() {
        let log: Log = Rc::default();
        let stat = Stat::new(5);
        stat.listen(&recorder(&log, "a"));

        stat.set(5);
        stat.set(5);

        assert_eq!(*log.borrow(), vec!["a:5->5", "a:5->5"]);
    }

    #[test]
    fn with_args_listeners_run_before_no_args_listeners() {
        let log: Log = Rc::default();
        let stat = Stat::new(0);

        stat.listen(&pinger(&log, "p1"));
        stat.listen(&recorder(&log, "r1"));
        stat.listen(&pinger(&log, "p2"));
        stat.listen(&recorder(&log, "r2"));

        stat.set(1);

        assert_eq!(*log.borrow(), vec!["r1:0->1", "r2:0->1", "p1", "p2"]);
    }

    #[test]
    fn duplicate_listen_fires_once() {
        let log: Log = Rc::default();
        let stat = Stat::new(0);
        let r = recorder(&log, "r");
        let p = pinger(&log, "p");

        stat.listen(&r);
        stat.listen(&r);
        stat.listen(&r.clone());
        stat.listen(&p);
        stat.listen(&p);

        assert_eq!(stat.listener_count(), 2);
        stat.set(1);
        assert_eq!(*log.borrow(), vec!["r:0->1", "p"]);
    }

    #[test]
    fn relisten_moves_to_end_of_order() {
        let log: Log = Rc::default();
        let stat = Stat::new(0);
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");

        stat.listen(&a);
        stat.listen(&b);
        stat.listen(&a);
        stat.set(1);

        assert_eq!(*log.borrow(), vec!["b:0->1", "a:0->1"]);
    }

    #[test]
    fn stop_listen_unregistered_is_noop() {
        let log: Log = Rc::default();
        let stat = Stat::new(0);
        let registered = recorder(&log, "r");
        let stranger = recorder(&log, "s");
        let stranger_ping = pinger(&log, "sp");

        stat.listen(&registered);
        stat.stop_listen(&stranger);
        stat.stop_listen(&stranger_ping);
        stat.stop_listen(&stranger);

        assert_eq!(stat.listener_count(), 1);
        stat.set(3);
        assert_eq!(*log.borrow(), vec!["r:0->3"]);
    }

    #[test]
    fn reset_fires_even_when_already_initial() {
        let log: Log = Rc::default();
        let stat = Stat::new(10);
        stat.listen(&recorder(&log, "r"));

        stat.reset();
        stat.set(4);
        stat.reset();

        assert_eq!(stat.get(), 10);
        assert_eq!(*log.borrow(), vec!["r:10->10", "r:10->4", "r:4->10"]);
    }

    #[test]
    fn update_routes_through_set() {
        let log: Log = Rc::default();
        let stat = Stat::new(2);
        stat.listen(&recorder(&log, "r"));

        stat.update(|n| n * 3);

        assert_eq!(stat.get(), 6);
        assert_eq!(*log.borrow(), vec!["r:2->6"]);
    }

    #[test]
    fn update_closure_may_set_same_stat() {
        let log: Log = Rc::default();
        let stat = Rc::new(Stat::new(1));
        stat.listen(&recorder(&log, "r"));

        let inner = Rc::clone(&stat);
        stat.update(|n| {
            inner.set(99);
            n + 1
        });

        assert_eq!(stat.get(), 2);
        assert_eq!(*log.borrow(), vec!["r:1->99", "r:99->2"]);
    }

    #[test]
    fn listener_relisted_mid_pass_waits_for_next_set() {
        let log: Log = Rc::default();
        let stat = Rc::new(Stat::new(0));
        let victim = recorder(&log, "victim");

        let relister = OnChanged::new({
            let stat = Rc::downgrade(&stat);
            let victim = victim.clone();
            move |_: &i32, _: &i32| {
                if let Some(stat) = stat.upgrade() {
                    stat.stop_listen(&victim);
                    stat.listen(&victim);
                }
            }
        });

        stat.listen(&relister);
        stat.listen(&victim);
        stat.set(1);
        assert!(log.borrow().is_empty());

        stat.stop_listen(&relister);
        stat.set(2);
        assert_eq!(*log.borrow(), vec!["victim:1->2"]);
    }

    #[test]
    fn listener_removed_mid_pass_does_not_fire() {
        let log: Log = Rc::default();
        let stat = Rc::new(Stat::new(0));
        let victim = recorder(&log, "victim");

        let remover = OnChanged::new({
            let stat = Rc::downgrade(&stat);
            let victim = victim.clone();
            move |_: &i32, _: &i32| {
                if let Some(stat) = stat.upgrade() {
                    stat.stop_listen(&victim);
                }
            }
        });

        stat.listen(&remover);
        stat.listen(&victim);
        stat.set(1);

        assert!(log.borrow().is_empty());
        assert_eq!(stat.listener_count(), 1);
    }

    #[test]
    fn removing_already_invoked_listener_is_harmless() {
        let log: Log = Rc::default();
        let stat = Rc::new(Stat::new(0));
        let first = recorder(&log, "first");
        let last = recorder(&log, "last");

        let remover = OnChanged::new({
            let stat = Rc::downgrade(&stat);
            let first = first.clone();
            move |_: &i32, _: &i32| {
                if let Some(stat) = stat.upgrade() {
                    stat.stop_listen(&first);
                }
            }
        });

        stat.listen(&first);
        stat.listen(&remover);
        stat.listen(&last);
        stat.set(1);

        assert_eq!(*log.borrow(), vec!["first:0->1", "last:0->1"]);

        stat.set(2);
        assert_eq!(*log.borrow(), vec!["first:0->1", "last:0->1", "last:1->2"]);
    }

    #[test]
    fn listener_added_mid_pass_waits_for_next_set() {
        let log: Log = Rc::default();
        let stat = Rc::new(Stat::new(0));
        let late = recorder(&log, "late");

        let adder = OnChanged::new({
            let stat = Rc::downgrade(&stat);
            let late = late.clone();
            move |_: &i32, _: &i32| {
                if let Some(stat) = stat.upgrade() {
                    stat.listen(&late);
                }
            }
        });

        stat.listen(&adder);
        stat.set(1);
        assert!(log.borrow().is_empty());

        stat.set(2);
        assert_eq!(*log.borrow(), vec!["late:1->2"]);
    }

    #[test]
    fn nested_set_runs_its_own_pass() {
        let log: Log = Rc::default();
        let stat = Rc::new(Stat::new(0));

        let clamp = OnChanged::new({
            let stat = Rc::downgrade(&stat);
            move |_: &i32, new: &i32| {
                if *new > 100 {
                    if let Some(stat) = stat.upgrade() {
                        stat.set(100);
                    }
                }
            }
        });

        stat.listen(&clamp);
        stat.listen(&recorder(&log, "r"));
        stat.set(250);

        assert_eq!(stat.get(), 100);
        assert_eq!(*log.borrow(), vec!["r:250->100", "r:0->250"]);
    }

    #[test]
    fn get_inside_listener_sees_new_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let stat = Rc::new(Stat::new(String::from("a")));

        let reader = OnChangedNoArgs::new({
            let stat = Rc::downgrade(&stat);
            let seen = seen.clone();
            move || {
                if let Some(stat) = stat.upgrade() {
                    seen.borrow_mut().push(stat.get());
                }
            }
        });

        stat.listen(&reader);
        stat.set(String::from("b"));

        assert_eq!(*seen.borrow(), vec![String::from("b")]);
    }

    #[test]
    fn default_and_from() {
        let stat: Stat<u8> = Stat::default();
        assert_eq!(stat.get(), 0);

        let stat = Stat::from(vec![1, 2]);
        assert_eq!(stat.with(|v| v.len()), 2);
    }

    #[test]
    fn debug_shows_values() {
        let stat = Stat::new(1);
        stat.set(2);
        assert_eq!(
            format!("{stat:?}"),
            "Stat { initial: 1, current: 2, listeners: 0 }"
        );
    }
}
