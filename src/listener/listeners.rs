use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

/// One registration of a callback. `live` is cleared when the registration
/// is removed, so a pass holding an older snapshot can skip it.
struct Slot<F: ?Sized> {
    callback: Rc<F>,
    live: Cell<bool>,
}

/// Ordered set of listener callbacks keyed by `Rc` identity.
///
/// Entries are kept in registration order. An entry appears at most once;
/// inserting an entry that is already present moves it to the end.
pub struct Listeners<F: ?Sized> {
    name: &'static str,
    slots: RefCell<Vec<Rc<Slot<F>>>>,
}

impl<F: ?Sized> Listeners<F> {
    /// Create an empty collection. `name` only shows up in trace events.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: RefCell::new(Vec::new()),
        }
    }

    /// Register `entry`, first dropping any existing registration of it.
    ///
    /// Returns true if the entry was already registered.
    pub fn insert(&self, entry: &Rc<F>) -> bool {
        let mut slots = self.slots.borrow_mut();
        let existed = Self::take(&mut slots, entry);
        slots.push(Rc::new(Slot {
            callback: Rc::clone(entry),
            live: Cell::new(true),
        }));
        trace!(
            collection = self.name,
            existed,
            len = slots.len(),
            "listener registered"
        );
        existed
    }

    /// Unregister `entry`. Returns true if it was registered.
    pub fn remove(&self, entry: &Rc<F>) -> bool {
        let mut slots = self.slots.borrow_mut();
        let removed = Self::take(&mut slots, entry);
        trace!(
            collection = self.name,
            removed,
            len = slots.len(),
            "listener unregistered"
        );
        removed
    }

    /// Returns true if `entry` is currently registered.
    pub fn contains(&self, entry: &Rc<F>) -> bool {
        self.slots
            .borrow()
            .iter()
            .any(|slot| Rc::ptr_eq(&slot.callback, entry))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Invoke every entry registered at the time of the call, in order.
    ///
    /// The registrations are cloned out first, so no borrow is held while a
    /// callback runs. A registration removed by an earlier callback of the
    /// same pass is skipped; one added during the pass (including a removed
    /// and re-added entry) waits for the next pass.
    pub fn fire(&self, mut invoke: impl FnMut(&F)) {
        if self.is_empty() {
            return;
        }

        let snapshot = self.slots.borrow().clone();
        for slot in snapshot {
            if !slot.live.get() {
                trace!(collection = self.name, "skipping listener removed mid-pass");
                continue;
            }
            invoke(&*slot.callback);
        }
    }

    fn take(slots: &mut Vec<Rc<Slot<F>>>, entry: &Rc<F>) -> bool {
        match slots.iter().position(|slot| Rc::ptr_eq(&slot.callback, entry)) {
            Some(index) => {
                slots.remove(index).live.set(false);
                true
            }
            None => false,
        }
    }
}
