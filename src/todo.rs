use std::{fmt, ops::Deref, rc::Rc};

use parse_display::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Identifier of a [`Todo`]. Never reused once assigned.
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display("{0}")]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}
impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
impl PartialEq<str> for TodoId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for TodoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single todo item.
///
/// `Todo` is never modified after construction. The `with_*` methods return a new value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    id: TodoId,
    description: String,
    completed: bool,
}

impl Todo {
    pub fn new(id: impl Into<TodoId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            completed: false,
        }
    }
    pub fn id(&self) -> &TodoId {
        &self.id
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }
    pub fn toggled(&self) -> Self {
        self.with_completed(!self.completed)
    }
}
impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'x' } else { ' ' };
        write!(f, "[{mark}] {} {}", self.id, self.description)
    }
}

/// An ordered, immutable list of todos.
///
/// Operations return a new list. Items that an operation does not touch are
/// shared with the original list, so `Rc::ptr_eq` tells whether an item changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Todos(Vec<Rc<Todo>>);

impl Todos {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The three items a new list view starts with.
    pub fn seed() -> Self {
        [
            Todo::new("todo-0", "hi"),
            Todo::new("todo-1", "hello"),
            Todo::new("todo-2", "bonjour"),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Rc<Todo>> {
        self.0.iter().find(|t| &t.id == id)
    }
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn added(&self, todo: Todo) -> Self {
        let mut items = self.0.clone();
        items.push(Rc::new(todo));
        Self(items)
    }
    pub fn toggled(&self, id: &TodoId) -> Self {
        self.replaced(id, Todo::toggled)
    }
    pub fn edited(&self, id: &TodoId, description: &str) -> Self {
        self.replaced(id, |t| t.with_description(description))
    }
    pub fn removed(&self, id: &TodoId) -> Self {
        self.retained(|t| &t.id != id)
    }
    pub fn without_completed(&self) -> Self {
        self.retained(|t| !t.completed)
    }

    /// Sets `completed` on every item. Items that already have that value are kept as is.
    pub fn with_all_completed(&self, completed: bool) -> Self {
        self.0
            .iter()
            .map(|t| {
                if t.completed == completed {
                    t.clone()
                } else {
                    Rc::new(t.with_completed(completed))
                }
            })
            .collect()
    }

    fn replaced(&self, id: &TodoId, f: impl FnOnce(&Todo) -> Todo) -> Self {
        let mut items = self.0.clone();
        if let Some(item) = items.iter_mut().find(|t| &t.id == id) {
            *item = Rc::new(f(item));
        }
        Self(items)
    }
    pub(crate) fn retained(&self, f: impl Fn(&Todo) -> bool) -> Self {
        self.0.iter().filter(|t| f(t)).cloned().collect()
    }
}
impl Deref for Todos {
    type Target = [Rc<Todo>];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl FromIterator<Rc<Todo>> for Todos {
    fn from_iter<I: IntoIterator<Item = Rc<Todo>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl FromIterator<Todo> for Todos {
    fn from_iter<I: IntoIterator<Item = Todo>>(iter: I) -> Self {
        iter.into_iter().map(Rc::new).collect()
    }
}
impl<'a> IntoIterator for &'a Todos {
    type Item = &'a Rc<Todo>;
    type IntoIter = std::slice::Iter<'a, Rc<Todo>>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
