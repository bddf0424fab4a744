use assert_call::{call, CallRecorder};
use rstest::rstest;

use super::*;

fn sequential() -> StoreConfig {
    StoreConfig {
        id_scheme: IdScheme::Sequential,
        ..StoreConfig::default()
    }
}

fn ids(store: &TodoStore) -> Vec<String> {
    store.read().iter().map(|t| t.id().to_string()).collect()
}

#[test]
fn new_is_empty() {
    let store = TodoStore::new(&StoreConfig::default());
    assert!(store.read().is_empty());
}

#[test]
fn add() {
    let store = TodoStore::seeded(&StoreConfig::default());
    let id = store.add("milk");
    let todos = store.read();
    assert_eq!(todos.len(), 4);
    let last = todos.last().unwrap();
    assert_eq!(last.id(), &id);
    assert_eq!(last.description(), "milk");
    assert!(!last.is_completed());
}

#[test]
fn add_empty_description() {
    let store = TodoStore::new(&StoreConfig::default());
    store.add("");
    assert_eq!(store.read()[0].description(), "");
}

#[rstest]
#[case(false)]
#[case(true)]
fn add_uses_configured_completed(#[case] completed_on_add: bool) {
    let store = TodoStore::new(&StoreConfig {
        completed_on_add,
        ..StoreConfig::default()
    });
    store.add("x");
    assert_eq!(store.read()[0].is_completed(), completed_on_add);
}

#[rstest]
#[case(false)]
#[case(true)]
fn add_with_explicit_completed(#[case] completed: bool) {
    let store = TodoStore::new(&StoreConfig::default());
    let id = store.add_with("x", completed);
    assert_eq!(store.read().get(&id).unwrap().is_completed(), completed);
}

#[test]
fn sequential_ids_continue_after_seed() {
    let store = TodoStore::seeded(&sequential());
    assert_eq!(store.add("a"), "todo-3");
    assert_eq!(store.add("b"), "todo-4");
}

#[test]
fn sequential_ids_are_not_reused() {
    let store = TodoStore::seeded(&sequential());
    let id = store.add("a");
    store.remove(&id);
    assert_eq!(store.add("b"), "todo-4");
}

#[test]
fn sequential_ids_skip_existing() {
    let todos: Todos = [Todo::new("todo-1", "taken")].into_iter().collect();
    let store = TodoStore::with_todos(&sequential(), todos);
    assert_eq!(store.add("a"), "todo-2");

    let todos: Todos = [Todo::new("todo-0", "x"), Todo::new("todo-2", "y")]
        .into_iter()
        .collect();
    let store = TodoStore::with_todos(&sequential(), todos);
    assert_eq!(store.add("a"), "todo-3");
}

#[test]
fn uuid_ids_are_unique() {
    let store = TodoStore::new(&StoreConfig::default());
    let a = store.add("a");
    let b = store.add("b");
    assert_ne!(a, b);
}

#[test]
fn toggle() {
    let store = TodoStore::seeded(&StoreConfig::default());
    let before = store.read();
    store.toggle(&TodoId::from("todo-1"));
    let after = store.read();
    assert!(after[1].is_completed());
    assert!(!before[1].is_completed());
    assert!(Rc::ptr_eq(&before[0], &after[0]));
    assert!(Rc::ptr_eq(&before[2], &after[2]));

    store.toggle(&TodoId::from("todo-1"));
    assert_eq!(*store.read(), *before);
}

#[test]
fn edit() {
    let store = TodoStore::seeded(&StoreConfig::default());
    let before = store.read();
    store.edit(&TodoId::from("todo-0"), "bonjour2");
    let after = store.read();
    assert_eq!(after[0].id(), &TodoId::from("todo-0"));
    assert_eq!(after[0].description(), "bonjour2");
    assert!(!after[0].is_completed());
    assert!(Rc::ptr_eq(&before[1], &after[1]));
    assert!(Rc::ptr_eq(&before[2], &after[2]));
}

#[test]
fn remove() {
    let store = TodoStore::seeded(&StoreConfig::default());
    store.remove(&TodoId::from("todo-1"));
    assert_eq!(ids(&store), ["todo-0", "todo-2"]);
    assert!(!store.contains(&TodoId::from("todo-1")));
}

#[test]
fn absent_id_publishes_unchanged_snapshot() {
    let mut cr = CallRecorder::new();
    let store = TodoStore::seeded(&StoreConfig::default());
    let before = store.read();
    let _u = store.subscribe(|todos| call!("{}", todos.len()));
    let missing = TodoId::from("missing");

    store.toggle(&missing);
    store.edit(&missing, "x");
    store.remove(&missing);
    cr.verify(["3", "3", "3"]);
    assert_eq!(*store.read(), *before);
    assert!(!Rc::ptr_eq(&store.read(), &before));
}

#[test]
fn notify_once_per_mutation() {
    let mut cr = CallRecorder::new();
    let store = TodoStore::seeded(&sequential());
    let s = store.todos().clone();
    let _u = store.subscribe(move |todos| {
        assert!(Rc::ptr_eq(todos, &s.read()));
        call!("{}", todos.len());
    });

    store.add("a");
    cr.verify("4");
    store.toggle(&TodoId::from("todo-3"));
    cr.verify("4");
    store.edit(&TodoId::from("todo-3"), "b");
    cr.verify("4");
    store.remove(&TodoId::from("todo-0"));
    cr.verify("3");
    store.clear_completed();
    cr.verify("2");
    store.toggle_all();
    cr.verify("2");
}

#[test]
fn clear_completed() {
    let store = TodoStore::seeded(&StoreConfig::default());
    store.toggle(&TodoId::from("todo-0"));
    store.toggle(&TodoId::from("todo-2"));
    store.clear_completed();
    assert_eq!(ids(&store), ["todo-1"]);
}

#[test]
fn toggle_all() {
    let store = TodoStore::seeded(&StoreConfig::default());
    store.toggle(&TodoId::from("todo-1"));
    store.toggle_all();
    assert!(store.read().iter().all(|t| t.is_completed()));
    store.toggle_all();
    assert!(store.read().iter().all(|t| !t.is_completed()));
}

#[test]
fn toggle_all_empty() {
    let store = TodoStore::new(&StoreConfig::default());
    store.toggle_all();
    assert!(store.read().is_empty());
}

#[test]
fn sequential_ids_start_above_initial_ids() {
    let todos: Todos = [Todo::new("todo-3", "x")].into_iter().collect();
    let store = TodoStore::with_todos(&sequential(), todos);
    store.remove(&TodoId::from("todo-3"));
    let added: Vec<_> = (0..4).map(|_| store.add("y").to_string()).collect();
    assert_eq!(added, ["todo-4", "todo-5", "todo-6", "todo-7"]);
}

#[test]
fn sequential_ids_ignore_other_id_forms() {
    let todos: Todos = [Todo::new("todo-x", "a"), Todo::new("item-9", "b")]
        .into_iter()
        .collect();
    let store = TodoStore::with_todos(&sequential(), todos);
    assert_eq!(store.add("c"), "todo-0");
}

#[test]
fn with_todos_keeps_first_of_duplicate_ids() {
    let todos: Todos = [
        Todo::new("a", "first"),
        Todo::new("b", "other"),
        Todo::new("a", "second"),
    ]
    .into_iter()
    .collect();
    let store = TodoStore::with_todos(&StoreConfig::default(), todos);
    assert_eq!(ids(&store), ["a", "b"]);
    assert_eq!(store.read()[0].description(), "first");

    store.toggle(&TodoId::from("a"));
    assert_eq!(store.read().iter().filter(|t| t.is_completed()).count(), 1);
}

#[test]
fn add_in_listener_delivers_latest_snapshot_last() {
    let store = Rc::new(TodoStore::seeded(&StoreConfig::default()));
    let store0 = Rc::downgrade(&store);
    let _a = store.subscribe(move |todos| {
        if todos.len() == 4 {
            if let Some(store) = store0.upgrade() {
                store.add("from listener");
            }
        }
    });
    let last_len = Rc::new(Cell::new(0));
    let last_len0 = last_len.clone();
    let _b = store.subscribe(move |todos| last_len0.set(todos.len()));

    store.add("x");
    assert_eq!(store.read().len(), 5);
    assert_eq!(last_len.get(), store.read().len());
}
