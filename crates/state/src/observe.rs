//! Observable single-value state store.
//!
//! [`StateCell`] backs both containers: a snapshot of state behind a
//! `tokio::sync::watch` channel. Every committed update notifies all
//! subscribers. Observers always read the latest committed snapshot and
//! may skip intermediate states, which is exactly the contract a
//! re-rendering view needs.

use tokio::sync::watch;

/// A single observable value with subscriber notification on commit.
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateCell<T> {
    /// Create a cell holding `initial`.
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Clone of the current committed snapshot.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Apply `f` to the state and commit, notifying all subscribers.
    ///
    /// Mutation inside `f` is synchronous and atomic with respect to
    /// other readers of this cell; no subscriber observes a half-applied
    /// update.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        // send_modify notifies even with zero receivers; a cell without
        // observers is still valid state.
        self.tx.send_modify(f);
    }

    /// Subscribe to committed changes.
    ///
    /// Await `changed()` on the receiver, then `borrow()` the latest
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
