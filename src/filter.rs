use std::rc::Rc;

use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

use crate::{State, Subscription, Todo};


/// Which items a list view shows.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, FromStr, Serialize, Deserialize,
)]
#[display(style = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.is_completed(),
            Filter::Completed => todo.is_completed(),
        }
    }
}

/// Holds the currently selected [`Filter`].
#[derive(Debug)]
pub struct FilterState(State<Filter>);

impl FilterState {
    pub fn new(initial: Filter) -> Self {
        Self(State::new(initial))
    }

    pub fn read(&self) -> Filter {
        *self.0.read()
    }

    /// Replaces the filter and notifies the listeners, even if the value is the same.
    pub fn set_filter(&self, value: Filter) {
        tracing::debug!(filter = %value, "set filter");
        self.0.set(value);
    }

    pub fn subscribe(&self, f: impl Fn(Filter) + 'static) -> Subscription {
        self.0.subscribe(move |value: &Rc<Filter>| f(**value))
    }

    /// The underlying state, for building derived values.
    pub fn state(&self) -> &State<Filter> {
        &self.0
    }
}
impl Default for FilterState {
    fn default() -> Self {
        Self::new(Filter::default())
    }
}
