use std::fmt;
use std::rc::Rc;

use crate::stat::Stat;

/// Handle to a callback that receives the old and the new value.
///
/// Listener identity is the handle's allocation: clones of a handle are the
/// same listener, while two handles built from identical closures are not.
/// Keep the handle around if you want to stop listening later.
///
/// # Examples
///
/// ```
/// use statcell::{OnChanged, Stat};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let stat = Stat::new(1);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let on_changed = OnChanged::new({
///     let seen = seen.clone();
///     move |old: &i32, new: &i32| seen.borrow_mut().push((*old, *new))
/// });
///
/// stat.listen(&on_changed);
/// stat.listen(&on_changed.clone()); // same listener, still registered once
/// stat.set(2);
///
/// assert_eq!(*seen.borrow(), vec![(1, 2)]);
/// ```
pub struct OnChanged<T> {
    callback: Rc<dyn Fn(&T, &T)>,
}

impl<T> OnChanged<T> {
    /// Wrap a callback into a new listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T, &T) + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invoke the callback directly.
    pub fn call(&self, old: &T, new: &T) {
        (self.callback)(old, new);
    }

    /// Returns true if both handles refer to the same listener.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<T> Clone for OnChanged<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<T> fmt::Debug for OnChanged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnChanged")
            .field("ptr", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Handle to a callback that only needs to know that the value changed.
///
/// Identity works the same way as for [`OnChanged`].
pub struct OnChangedNoArgs {
    callback: Rc<dyn Fn()>,
}

impl OnChangedNoArgs {
    /// Wrap a callback into a new listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invoke the callback directly.
    pub fn call(&self) {
        (self.callback)();
    }

    /// Returns true if both handles refer to the same listener.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl Clone for OnChangedNoArgs {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl fmt::Debug for OnChangedNoArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnChangedNoArgs")
            .field("ptr", &Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

mod sealed {
    use crate::stat::Stat;

    pub trait Attach<T> {
        fn attach(&self, stat: &Stat<T>);
        fn detach(&self, stat: &Stat<T>);
    }
}

/// A listener handle that can be registered on a [`Stat<T>`].
///
/// Implemented by [`OnChanged<T>`] and [`OnChangedNoArgs`]; each one is
/// routed to its own collection on the stat. This trait is sealed.
pub trait Listener<T>: sealed::Attach<T> {}

impl<T> sealed::Attach<T> for OnChanged<T> {
    fn attach(&self, stat: &Stat<T>) {
        stat.on_changed().insert(&self.callback);
    }

    fn detach(&self, stat: &Stat<T>) {
        stat.on_changed().remove(&self.callback);
    }
}

impl<T> Listener<T> for OnChanged<T> {}

impl<T> sealed::Attach<T> for OnChangedNoArgs {
    fn attach(&self, stat: &Stat<T>) {
        stat.on_changed_no_args().insert(&self.callback);
    }

    fn detach(&self, stat: &Stat<T>) {
        stat.on_changed_no_args().remove(&self.callback);
    }
}

impl<T> Listener<T> for OnChangedNoArgs {}
