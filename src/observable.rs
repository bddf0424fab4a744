use std::rc::Rc;

use crate::Subscription;

/// A value that can be read and watched for changes.
///
/// Implemented by [`State`](crate::State) and [`Signal`](crate::Signal),
/// so a [`Signal`](crate::Signal) can depend on either.
pub trait Observable {
    type Value: ?Sized + 'static;

    /// Returns the current value without side effects.
    fn read(&self) -> Rc<Self::Value>;

    /// Registers `f` to be called synchronously with the new value after each change.
    fn subscribe(&self, f: impl Fn(&Rc<Self::Value>) + 'static) -> Subscription;
}
