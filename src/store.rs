use std::{cell::Cell, collections::HashSet, rc::Rc};

use crate::{IdScheme, State, StoreConfig, Subscription, Todo, TodoId, Todos};

#[cfg(test)]
mod tests;

/// Owns the list of todos.
///
/// Each operation builds a new [`Todos`] from the current one and swaps it in as a whole,
/// so a listener or a holder of an earlier snapshot never sees a half-applied change.
/// Operations on an id that is not in the list leave the items unchanged and do not fail.
/// They still publish a snapshot.
#[derive(Debug)]
pub struct TodoStore {
    todos: State<Todos>,
    ids: IdGenerator,
    completed_on_add: bool,
}

impl TodoStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_todos(config, Todos::new())
    }
    pub fn seeded(config: &StoreConfig) -> Self {
        Self::with_todos(config, Todos::seed())
    }
    /// Creates a store holding `todos`.
    ///
    /// If several items share an id, only the first one is kept.
    pub fn with_todos(config: &StoreConfig, todos: Todos) -> Self {
        let todos = unique_ids(todos);
        Self {
            ids: IdGenerator::new(config.id_scheme, &todos),
            todos: State::new(todos),
            completed_on_add: config.completed_on_add,
        }
    }

    /// Returns the current snapshot.
    pub fn read(&self) -> Rc<Todos> {
        self.todos.read()
    }
    pub fn contains(&self, id: &TodoId) -> bool {
        self.todos.read().contains(id)
    }

    /// Registers a listener that receives every new snapshot.
    pub fn subscribe(&self, f: impl Fn(&Rc<Todos>) + 'static) -> Subscription {
        self.todos.subscribe(f)
    }

    /// The underlying state, for building derived values.
    pub fn todos(&self) -> &State<Todos> {
        &self.todos
    }

    /// Appends a new item and returns its id.
    ///
    /// `completed` is taken from [`StoreConfig::completed_on_add`].
    pub fn add(&self, description: impl Into<String>) -> TodoId {
        self.add_with(description, self.completed_on_add)
    }

    pub fn add_with(&self, description: impl Into<String>, completed: bool) -> TodoId {
        let todos = self.todos.read();
        let id = self.ids.next(&todos);
        let todo = Todo::new(id.clone(), description).with_completed(completed);
        tracing::debug!(%id, completed, "add");
        self.todos.set(todos.added(todo));
        id
    }

    pub fn toggle(&self, id: &TodoId) {
        self.apply("toggle", id, |todos| todos.toggled(id));
    }

    pub fn edit(&self, id: &TodoId, description: &str) {
        self.apply("edit", id, |todos| todos.edited(id, description));
    }

    pub fn remove(&self, id: &TodoId) {
        self.apply("remove", id, |todos| todos.removed(id));
    }

    /// Removes every completed item.
    pub fn clear_completed(&self) {
        tracing::debug!("clear completed");
        self.todos.update(Todos::without_completed);
    }

    /// Marks every item completed, or every item active if all are already completed.
    pub fn toggle_all(&self) {
        self.todos.update(|todos| {
            let completed = todos.iter().any(|t| !t.is_completed());
            tracing::debug!(completed, "toggle all");
            todos.with_all_completed(completed)
        });
    }

    fn apply(&self, op: &str, id: &TodoId, f: impl FnOnce(&Todos) -> Todos) {
        self.todos.update(|todos| {
            if todos.contains(id) {
                tracing::debug!(%id, "{op}");
            } else {
                tracing::debug!(%id, "{op}: no such todo");
            }
            f(todos)
        });
    }
}

#[derive(Debug)]
struct IdGenerator {
    scheme: IdScheme,
    next: Cell<usize>,
}

impl IdGenerator {
    /// Sequential ids start above the largest `todo-N` in `todos`,
    /// so an initial item that is later removed does not get its id back.
    fn new(scheme: IdScheme, todos: &Todos) -> Self {
        let start = todos
            .iter()
            .filter_map(|t| t.id().as_str().strip_prefix("todo-")?.parse::<usize>().ok())
            .map(|n| n + 1)
            .max()
            .unwrap_or(0);
        Self {
            scheme,
            next: Cell::new(start),
        }
    }

    /// Returns an id that is not in `todos` and has never been returned before.
    fn next(&self, todos: &Todos) -> TodoId {
        loop {
            let id = match self.scheme {
                IdScheme::Uuid => TodoId::new_v4(),
                IdScheme::Sequential => {
                    let n = self.next.get();
                    self.next.set(n + 1);
                    TodoId::from(format!("todo-{n}"))
                }
            };
            if !todos.contains(&id) {
                return id;
            }
        }
    }
}

fn unique_ids(todos: Todos) -> Todos {
    let mut seen = HashSet::new();
    if todos.iter().all(|t| seen.insert(t.id().clone())) {
        return todos;
    }
    seen.clear();
    todos
        .iter()
        .filter(|t| {
            let first = seen.insert(t.id().clone());
            if !first {
                tracing::warn!(id = %t.id(), "dropping item with duplicate id");
            }
            first
        })
        .cloned()
        .collect()
}
