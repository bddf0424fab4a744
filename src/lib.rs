//! Observable todo-list state for UI front ends.
//!
//! [`TodoStore`] and [`FilterState`] hold the source of truth as immutable snapshots.
//! [`DerivedViews`] exposes the active count and the filtered list as [`Signal`]s that
//! recompute only when their inputs change, and notify only when their output changes.

mod app;
mod command;
mod config;
mod derived;
mod filter;
mod listeners;
mod observable;
mod signal;
mod state;
mod store;
mod subscription;
mod todo;

pub use app::*;
pub use command::*;
pub use config::*;
pub use derived::*;
pub use filter::*;
pub use observable::*;
pub use signal::*;
pub use state::*;
pub use store::*;
pub use subscription::*;
pub use todo::*;
