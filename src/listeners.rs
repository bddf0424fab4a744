use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use slabmap::SlabMap;

use crate::Subscription;

struct Listener<T: ?Sized> {
    seq: u64,
    active: Cell<bool>,
    f: Box<dyn Fn(&Rc<T>)>,
}

/// Listeners of one observable value, called in registration order.
pub(crate) struct Listeners<T: ?Sized> {
    entries: SlabMap<Rc<Listener<T>>>,
    next_seq: u64,
}

impl<T: ?Sized + 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            entries: SlabMap::new(),
            next_seq: 0,
        }
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, f: Box<dyn Fn(&Rc<T>)>) -> usize {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(Rc::new(Listener {
            seq,
            active: Cell::new(true),
            f,
        }))
    }
    fn remove(&mut self, key: usize) {
        if let Some(listener) = self.entries.remove(key) {
            listener.active.set(false);
        }
    }

    /// Registers `f` on the listener list of `node` and returns a handle that removes it again.
    ///
    /// The handle holds only a weak reference to `node`.
    pub fn subscribe<N: 'static>(
        node: &Rc<N>,
        listeners: fn(&N) -> &RefCell<Self>,
        f: impl Fn(&Rc<T>) + 'static,
    ) -> Subscription {
        let key = listeners(node).borrow_mut().insert(Box::new(f));
        Subscription::from_weak_fn(Rc::downgrade(node), move |node| {
            listeners(&node).borrow_mut().remove(key);
        })
    }

    /// Calls every listener with `value`.
    ///
    /// The list is copied before the first call and `this` is not borrowed while listeners run,
    /// so listeners may subscribe, unsubscribe, or mutate the value again.
    /// A listener removed during the round is not called.
    ///
    /// `is_current` is checked before each call. Once a listener has replaced the value,
    /// the nested round has already delivered the newer value to every listener,
    /// so the rest of this round is skipped.
    pub fn notify(this: &RefCell<Self>, value: &Rc<T>, is_current: impl Fn(&Rc<T>) -> bool) {
        let mut listeners: Vec<_> = this.borrow().entries.values().cloned().collect();
        listeners.sort_by_key(|l| l.seq);
        tracing::trace!(listeners = listeners.len(), "notify");
        for l in listeners {
            if !is_current(value) {
                tracing::trace!("value replaced during notify");
                return;
            }
            if l.active.get() {
                (l.f)(value);
            }
        }
    }
}
