use std::{cell::RefCell, rc::Rc};

use derive_ex::derive_ex;
use serde::{Deserialize, Serialize};

use crate::{listeners::Listeners, Observable, Subscription};


/// Similar to `Rc<RefCell<Rc<T>>>`, but with added functionality to observe changes.
///
/// The value is never modified in place. Every change swaps in a new `Rc<T>`,
/// so a reader holding a previous value keeps a complete, unchanged snapshot.
#[derive_ex(Clone, bound())]
pub struct State<T: 'static>(Rc<StateNode<T>>);

impl<T: 'static> State<T> {
    /// Create a new `State` with the given initial value.
    pub fn new(value: T) -> Self {
        Self::from_rc(Rc::new(value))
    }
    pub fn from_rc(value: Rc<T>) -> Self {
        Self(Rc::new(StateNode {
            value: RefCell::new(value),
            listeners: RefCell::new(Listeners::new()),
        }))
    }

    /// Returns the current snapshot.
    pub fn read(&self) -> Rc<T> {
        self.0.value.borrow().clone()
    }

    /// Sets the value of the state and notifies the listeners.
    pub fn set(&self, value: T) {
        self.replace(Rc::new(value));
    }

    /// Sets the value of the state to an existing snapshot and notifies the listeners.
    pub fn replace(&self, value: Rc<T>) {
        *self.0.value.borrow_mut() = value.clone();
        Listeners::notify(&self.0.listeners, &value, |value| {
            Rc::ptr_eq(&*self.0.value.borrow(), value)
        });
    }

    /// Builds a new value from the current one and notifies the listeners.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let value = f(&self.read());
        self.set(value);
    }

    /// Registers a listener that is called after every change, in registration order.
    pub fn subscribe(&self, f: impl Fn(&Rc<T>) + 'static) -> Subscription {
        Listeners::<T>::subscribe(&self.0, |node| &node.listeners, f)
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }
}
impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.value.try_borrow() {
            Ok(value) => std::fmt::Debug::fmt(&**value, f),
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}
impl<T> Serialize for State<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        T::serialize(&self.read(), serializer)
    }
}
impl<'de, T> Deserialize<'de> for State<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<State<T>, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(|value| State::new(value))
    }
}
impl<T: 'static> Observable for State<T> {
    type Value = T;
    fn read(&self) -> Rc<T> {
        self.read()
    }
    fn subscribe(&self, f: impl Fn(&Rc<T>) + 'static) -> Subscription {
        self.subscribe(f)
    }
}

struct StateNode<T: 'static> {
    value: RefCell<Rc<T>>,
    listeners: RefCell<Listeners<T>>,
}
