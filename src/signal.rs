use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use derive_ex::derive_ex;

use crate::{listeners::Listeners, Observable, Subscription};


/// A value derived from one or two [`Observable`] sources.
///
/// The value is computed on demand and cached. The cache is keyed on the
/// `Rc` identity of the inputs, so it is reused until a source publishes a new value.
///
/// While a `Signal` has listeners, it recomputes as soon as a source changes and
/// notifies only if the result differs from the value it last published.
#[derive_ex(Clone, bound())]
pub struct Signal<T: 'static>(Rc<dyn DynSignalNode<T>>);

impl<T: PartialEq + 'static> Signal<T> {
    pub fn map<A, R>(source: &A, f: impl Fn(&Rc<A::Value>) -> R + 'static) -> Self
    where
        A: Observable + Clone + 'static,
        R: Into<Rc<T>>,
    {
        Self::from_deps((source.clone(),), move |(a,): &(Rc<A::Value>,)| {
            f(a).into()
        })
    }

    pub fn map2<A, B, R>(
        a: &A,
        b: &B,
        f: impl Fn(&Rc<A::Value>, &Rc<B::Value>) -> R + 'static,
    ) -> Self
    where
        A: Observable + Clone + 'static,
        B: Observable + Clone + 'static,
        R: Into<Rc<T>>,
    {
        Self::from_deps(
            (a.clone(), b.clone()),
            move |(a, b): &(Rc<A::Value>, Rc<B::Value>)| f(a, b).into(),
        )
    }

    fn from_deps<D: Deps>(deps: D, compute: impl Fn(&D::Inputs) -> Rc<T> + 'static) -> Self {
        let node = Rc::new(SignalNode {
            deps,
            compute,
            cache: RefCell::new(None),
            published: RefCell::new(None),
            listeners: RefCell::new(Listeners::new()),
            sources: RefCell::new(Vec::new()),
            computations: Cell::new(0),
        });
        let weak = Rc::downgrade(&node);
        let on_change: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(node) = weak.upgrade() {
                node.on_source_changed();
            }
        });
        *node.sources.borrow_mut() = node.deps.subscribe(&on_change);
        Self(node)
    }
}

impl<T: 'static> Signal<T> {
    /// Returns the current value, recomputing it only if an input has changed.
    pub fn read(&self) -> Rc<T> {
        self.0.read()
    }

    /// Registers a listener that is called when the value changes.
    pub fn subscribe(&self, f: impl Fn(&Rc<T>) + 'static) -> Subscription {
        self.0.clone().subscribe(Box::new(f))
    }

    /// Number of times the value has been computed.
    pub fn computations(&self) -> usize {
        self.0.computations()
    }
}
impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.read(), f)
    }
}
impl<T: 'static> Observable for Signal<T> {
    type Value = T;
    fn read(&self) -> Rc<T> {
        self.read()
    }
    fn subscribe(&self, f: impl Fn(&Rc<T>) + 'static) -> Subscription {
        self.subscribe(f)
    }
}

/// The sources a signal depends on.
trait Deps: 'static {
    type Inputs;
    fn read(&self) -> Self::Inputs;
    fn same(a: &Self::Inputs, b: &Self::Inputs) -> bool;
    fn subscribe(&self, on_change: &Rc<dyn Fn()>) -> Vec<Subscription>;
}

fn watch<A: Observable>(source: &A, on_change: &Rc<dyn Fn()>) -> Subscription {
    let on_change = on_change.clone();
    source.subscribe(move |_| on_change())
}

impl<A: Observable + 'static> Deps for (A,) {
    type Inputs = (Rc<A::Value>,);
    fn read(&self) -> Self::Inputs {
        (self.0.read(),)
    }
    fn same(a: &Self::Inputs, b: &Self::Inputs) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
    fn subscribe(&self, on_change: &Rc<dyn Fn()>) -> Vec<Subscription> {
        vec![watch(&self.0, on_change)]
    }
}
impl<A: Observable + 'static, B: Observable + 'static> Deps for (A, B) {
    type Inputs = (Rc<A::Value>, Rc<B::Value>);
    fn read(&self) -> Self::Inputs {
        (self.0.read(), self.1.read())
    }
    fn same(a: &Self::Inputs, b: &Self::Inputs) -> bool {
        Rc::ptr_eq(&a.0, &b.0) && Rc::ptr_eq(&a.1, &b.1)
    }
    fn subscribe(&self, on_change: &Rc<dyn Fn()>) -> Vec<Subscription> {
        vec![watch(&self.0, on_change), watch(&self.1, on_change)]
    }
}

trait DynSignalNode<T: 'static> {
    fn read(&self) -> Rc<T>;
    fn subscribe(self: Rc<Self>, f: Box<dyn Fn(&Rc<T>)>) -> Subscription;
    fn computations(&self) -> usize;
}

struct SignalNode<D: Deps, T: 'static, F> {
    deps: D,
    compute: F,
    cache: RefCell<Option<(D::Inputs, Rc<T>)>>,
    published: RefCell<Option<Rc<T>>>,
    listeners: RefCell<Listeners<T>>,
    sources: RefCell<Vec<Subscription>>,
    computations: Cell<usize>,
}

impl<D, T, F> SignalNode<D, T, F>
where
    D: Deps,
    T: PartialEq + 'static,
    F: Fn(&D::Inputs) -> Rc<T> + 'static,
{
    fn eval(&self) -> Rc<T> {
        let inputs = self.deps.read();
        if let Some((cached, value)) = &*self.cache.borrow() {
            if D::same(cached, &inputs) {
                return value.clone();
            }
        }
        let value = (self.compute)(&inputs);
        self.computations.set(self.computations.get() + 1);
        tracing::trace!(computations = self.computations.get(), "signal recomputed");
        *self.cache.borrow_mut() = Some((inputs, value.clone()));
        value
    }

    fn on_source_changed(&self) {
        if self.listeners.borrow().is_empty() {
            return;
        }
        let value = self.eval();
        if let Some(old) = &*self.published.borrow() {
            if Rc::ptr_eq(old, &value) || **old == *value {
                tracing::trace!("signal unchanged");
                return;
            }
        }
        *self.published.borrow_mut() = Some(value.clone());
        Listeners::notify(&self.listeners, &value, |value| {
            self.published
                .borrow()
                .as_ref()
                .is_some_and(|published| Rc::ptr_eq(published, value))
        });
    }
}

impl<D, T, F> DynSignalNode<T> for SignalNode<D, T, F>
where
    D: Deps,
    T: PartialEq + 'static,
    F: Fn(&D::Inputs) -> Rc<T> + 'static,
{
    fn read(&self) -> Rc<T> {
        self.eval()
    }

    fn subscribe(self: Rc<Self>, f: Box<dyn Fn(&Rc<T>)>) -> Subscription {
        if self.listeners.borrow().is_empty() {
            let value = self.eval();
            *self.published.borrow_mut() = Some(value);
        }
        Listeners::<T>::subscribe(&self, |node| &node.listeners, f)
    }

    fn computations(&self) -> usize {
        self.computations.get()
    }
}
