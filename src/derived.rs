use std::rc::Rc;

use crate::{Filter, FilterState, Signal, TodoStore, Todos};


/// Number of items that are not completed.
pub fn active_count(todos: &Todos) -> usize {
    todos.iter().filter(|t| !t.is_completed()).count()
}

pub fn completed_count(todos: &Todos) -> usize {
    todos.len() - active_count(todos)
}

/// Items matching `filter`, in list order.
///
/// [`Filter::All`] returns `todos` itself.
pub fn filtered_list(todos: &Rc<Todos>, filter: Filter) -> Rc<Todos> {
    match filter {
        Filter::All => todos.clone(),
        _ => Rc::new(todos.retained(|t| filter.matches(t))),
    }
}

/// The derived values a list view renders, bound to a store and a filter.
///
/// Listeners of each value are notified only when that value changes.
/// Editing a description, for example, does not notify listeners of [`active_count`](Self::active_count).
#[derive(Debug)]
pub struct DerivedViews {
    active_count: Signal<usize>,
    completed_count: Signal<usize>,
    filtered_todos: Signal<Todos>,
}

impl DerivedViews {
    pub fn new(store: &TodoStore, filter: &FilterState) -> Self {
        Self {
            active_count: Signal::map(store.todos(), |todos| active_count(todos)),
            completed_count: Signal::map(store.todos(), |todos| completed_count(todos)),
            filtered_todos: Signal::map2(store.todos(), filter.state(), |todos, filter| {
                filtered_list(todos, **filter)
            }),
        }
    }

    pub fn active_count(&self) -> &Signal<usize> {
        &self.active_count
    }
    pub fn completed_count(&self) -> &Signal<usize> {
        &self.completed_count
    }
    pub fn filtered_todos(&self) -> &Signal<Todos> {
        &self.filtered_todos
    }
}
