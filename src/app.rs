use crate::{AppConfig, Command, DerivedViews, FilterState, TodoId, TodoStore};

/// The root object of a todo list view.
///
/// Owns the store, the filter and the values derived from them. A front end
/// creates one `TodoApp`, subscribes to what it renders and dispatches user
/// actions through [`apply`](Self::apply).
#[derive(Debug)]
pub struct TodoApp {
    store: TodoStore,
    filter: FilterState,
    views: DerivedViews,
}

impl TodoApp {
    pub fn new(config: &AppConfig) -> Self {
        let store = if config.seed {
            TodoStore::seeded(&config.store)
        } else {
            TodoStore::new(&config.store)
        };
        let filter = FilterState::new(config.initial_filter);
        let views = DerivedViews::new(&store, &filter);
        tracing::debug!(
            items = store.read().len(),
            filter = %config.initial_filter,
            "todo app created"
        );
        Self {
            store,
            filter,
            views,
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }
    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    /// Runs `command`. Returns the id of the new item for [`Command::Add`].
    pub fn apply(&self, command: Command) -> Option<TodoId> {
        match command {
            Command::Add(description) => return Some(self.store.add(description)),
            Command::Toggle(id) => self.store.toggle(&id),
            Command::Edit(id, description) => self.store.edit(&id, &description),
            Command::Remove(id) => self.store.remove(&id),
            Command::SetFilter(filter) => self.filter.set_filter(filter),
            Command::ClearCompleted => self.store.clear_completed(),
            Command::ToggleAll => self.store.toggle_all(),
            Command::List => {}
        }
        None
    }
}

impl Default for TodoApp {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
