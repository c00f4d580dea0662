use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut(f64)>;

#[derive(Default)]
struct Slot {
    callback: RefCell<Option<Callback>>,
    in_flight: Cell<bool>,
    cancelled: Cell<bool>,
    // Bumped per subscribe so a superseded guard cannot tear down its successor.
    generation: Cell<u64>,
}

/// Single-subscriber continuous progress signal.
///
/// The driving collaborator (a scroll container, a timeline, a test) publishes
/// real-valued progress; the player consumes it through a subscription with an
/// explicit teardown contract. At most one subscriber exists at a time and at
/// most one callback invocation is in flight: a reentrant publish from inside
/// the callback is dropped, never queued.
#[derive(Default)]
pub struct ProgressSignal {
    slot: Rc<Slot>,
}

impl ProgressSignal {
    /// Create a signal with no subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `callback` as the subscriber, replacing any previous one.
    ///
    /// The returned guard unsubscribes explicitly via
    /// [`ProgressSubscription::unsubscribe`] or implicitly on drop.
    pub fn subscribe(&mut self, callback: impl FnMut(f64) + 'static) -> ProgressSubscription {
        *self.slot.callback.borrow_mut() = Some(Box::new(callback));
        self.slot.cancelled.set(false);
        self.slot.generation.set(self.slot.generation.get() + 1);
        ProgressSubscription {
            slot: Rc::downgrade(&self.slot),
            generation: self.slot.generation.get(),
        }
    }

    /// Return `true` while a subscriber is installed.
    pub fn has_subscriber(&self) -> bool {
        self.slot.callback.borrow().is_some() || self.slot.in_flight.get()
    }

    /// Push one progress value to the subscriber, synchronously.
    ///
    /// The callback is taken out of the slot for the duration of the call, so a
    /// reentrant publish finds nothing to invoke. An unsubscribe issued from
    /// inside the callback stays effective: the callback is not reinstalled.
    pub fn publish(&self, progress: f64) {
        if self.slot.in_flight.get() {
            return;
        }
        let Some(mut callback) = self.slot.callback.borrow_mut().take() else {
            return;
        };

        self.slot.in_flight.set(true);
        callback(progress);
        self.slot.in_flight.set(false);

        if !self.slot.cancelled.get() {
            let mut slot = self.slot.callback.borrow_mut();
            // A resubscribe from inside the callback wins over the restore.
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }
}

impl std::fmt::Debug for ProgressSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSignal")
            .field("subscribed", &self.has_subscriber())
            .finish()
    }
}

/// Guard for an active [`ProgressSignal`] subscription.
pub struct ProgressSubscription {
    slot: Weak<Slot>,
    generation: u64,
}

impl ProgressSubscription {
    /// Remove the subscriber from the signal.
    pub fn unsubscribe(self) {
        self.clear();
    }

    fn clear(&self) {
        if let Some(slot) = self.slot.upgrade()
            && slot.generation.get() == self.generation
        {
            slot.cancelled.set(true);
            *slot.callback.borrow_mut() = None;
        }
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for ProgressSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSubscription")
            .field("live", &self.slot.upgrade().is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/signal.rs"]
mod tests;
