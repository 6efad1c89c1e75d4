//! Shared, once-evaluated cells.
//!
//! A [`LazyCell`] holds a thunk that runs at most once, on the first
//! [`force`](LazyCell::force). Every clone of a cell shares the same storage,
//! so whichever holder forces first pays for the evaluation and everyone else
//! reads the cached value.
//!
//! The cell also tracks whether its thunk is currently running. Forcing a cell
//! from inside its own thunk is a cycle in the node graph (a grammar that is
//! left-recursive, or a hand-built chain that loops back on itself) and panics
//! instead of recursing until the stack is gone. A thunk that panics poisons
//! the cell; later forces panic with a message saying so.

use std::cell::{Cell, OnceCell};
use std::fmt;
use std::rc::Rc;


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Pending,
    Running,
    Ready,
    Poisoned,
}

type Thunk<'a, T> = Box<dyn FnOnce() -> T + 'a>;

struct Inner<'a, T> {
    value: OnceCell<T>,
    state: Cell<State>,
    thunk: Cell<Option<Thunk<'a, T>>>,
}

/// A memoized deferred computation shared by reference.
///
/// Cells are single-threaded (`Rc` inside). A parse session and every node it
/// produces live on one thread.
pub struct LazyCell<'a, T> {
    inner: Rc<Inner<'a, T>>,
}

impl<'a, T> LazyCell<'a, T> {
    /// A cell that will run `thunk` on first force.
    pub fn new(thunk: impl FnOnce() -> T + 'a) -> Self {
        LazyCell {
            inner: Rc::new(Inner {
                value: OnceCell::new(),
                state: Cell::new(State::Pending),
                thunk: Cell::new(Some(Box::new(thunk))),
            }),
        }
    }

    /// A cell that is already evaluated.
    pub fn ready(value: T) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(value);
        LazyCell {
            inner: Rc::new(Inner {
                value: cell,
                state: Cell::new(State::Ready),
                thunk: Cell::new(None),
            }),
        }
    }

    /// Evaluate the thunk if nobody has yet, and return the cached value.
    ///
    /// # Panics
    ///
    /// Panics when called re-entrantly from the cell's own thunk, or when an
    /// earlier evaluation of the thunk panicked.
    pub fn force(&self) -> &T {
        if let Some(value) = self.inner.value.get() {
            return value;
        }
        match self.inner.state.get() {
            State::Running => panic!("lazy cell forced while its own thunk is running"),
            State::Poisoned => panic!("lazy cell poisoned by a panic in an earlier force"),
            State::Pending | State::Ready => {}
        }
        let Some(thunk) = self.inner.thunk.take() else {
            panic!("lazy cell has neither a value nor a thunk");
        };

        self.inner.state.set(State::Running);
        let guard = PoisonOnUnwind(&self.inner.state);
        let value = thunk();
        self.inner.state.set(State::Ready);
        drop(guard);

        self.inner.value.get_or_init(|| value)
    }

    /// The cached value, without evaluating anything.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.inner.value.get()
    }

    /// Whether the thunk has run (or the cell was built ready).
    #[inline]
    pub fn is_forced(&self) -> bool {
        self.inner.value.get().is_some()
    }

    /// Whether two handles share the same storage.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<T> Clone for LazyCell<'_, T> {
    fn clone(&self) -> Self {
        LazyCell {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyCell<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.value.get() {
            Some(value) => f.debug_tuple("LazyCell").field(value).finish(),
            None => write!(f, "LazyCell(<{:?}>)", self.inner.state.get()),
        }
    }
}

/// Marks the cell poisoned if the thunk unwinds.
struct PoisonOnUnwind<'s>(&'s Cell<State>);

impl Drop for PoisonOnUnwind<'_> {
    fn drop(&mut self) {
        if self.0.get() == State::Running {
            self.0.set(State::Poisoned);
        }
    }
}
