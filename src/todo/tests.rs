use rstest::rstest;

use super::*;

fn id(s: &str) -> TodoId {
    TodoId::from(s)
}

fn mixed() -> Todos {
    [
        Todo::new("a", "one"),
        Todo::new("b", "two").with_completed(true),
        Todo::new("c", "three"),
        Todo::new("d", "four").with_completed(true),
    ]
    .into_iter()
    .collect()
}

#[test]
fn todo_new() {
    let t = Todo::new("todo-9", "milk");
    assert_eq!(t.id(), &id("todo-9"));
    assert_eq!(t.description(), "milk");
    assert!(!t.is_completed());
}

#[test]
fn with_description_keeps_original() {
    let t = Todo::new("x", "old");
    let t2 = t.with_description("new");
    assert_eq!(t.description(), "old");
    assert_eq!(t2.description(), "new");
    assert_eq!(t2.id(), t.id());
    assert_eq!(t2.is_completed(), t.is_completed());
}

#[test]
fn toggled_negates() {
    let t = Todo::new("x", "");
    assert!(t.toggled().is_completed());
    assert_eq!(t.toggled().toggled(), t);
}

#[test]
fn display() {
    let t = Todo::new("todo-0", "hi");
    assert_eq!(t.to_string(), "[ ] todo-0 hi");
    assert_eq!(t.toggled().to_string(), "[x] todo-0 hi");
}

#[test]
fn new_v4_is_unique() {
    assert_ne!(TodoId::new_v4(), TodoId::new_v4());
}

#[test]
fn seed() {
    let todos = Todos::seed();
    let ids: Vec<_> = todos.iter().map(|t| t.id().as_str()).collect();
    let descriptions: Vec<_> = todos.iter().map(|t| t.description()).collect();
    assert_eq!(ids, ["todo-0", "todo-1", "todo-2"]);
    assert_eq!(descriptions, ["hi", "hello", "bonjour"]);
    assert!(todos.iter().all(|t| !t.is_completed()));
}

#[rstest]
#[case(Todos::new())]
#[case(Todos::seed())]
#[case(mixed())]
fn added_appends(#[case] todos: Todos) {
    let after = todos.added(Todo::new("new", "d"));
    assert_eq!(after.len(), todos.len() + 1);
    let last = after.last().unwrap();
    assert_eq!(last.description(), "d");
    assert!(!last.is_completed());
    assert_eq!(&after[..todos.len()], &todos[..]);
}

#[rstest]
#[case(Todos::seed(), "todo-1")]
#[case(mixed(), "a")]
#[case(mixed(), "d")]
fn toggle_is_involutive(#[case] todos: Todos, #[case] target: &str) {
    let once = todos.toggled(&id(target));
    assert_ne!(once, todos);
    assert_eq!(once.toggled(&id(target)), todos);
}

#[rstest]
#[case(Todos::new())]
#[case(Todos::seed())]
#[case(mixed())]
fn absent_id_is_noop(#[case] todos: Todos) {
    let missing = id("missing");
    assert_eq!(todos.toggled(&missing), todos);
    assert_eq!(todos.edited(&missing, "x"), todos);
    assert_eq!(todos.removed(&missing), todos);
}

#[test]
fn remove_keeps_order() {
    let todos = Todos::seed().removed(&id("todo-1"));
    let ids: Vec<_> = todos.iter().map(|t| t.id().as_str()).collect();
    assert_eq!(ids, ["todo-0", "todo-2"]);
}

#[test]
fn edit_shares_untouched_items() {
    let todos = Todos::seed();
    let edited = todos.edited(&id("todo-0"), "bonjour2");

    assert_eq!(edited[0].id(), &id("todo-0"));
    assert_eq!(edited[0].description(), "bonjour2");
    assert_eq!(edited[0].is_completed(), todos[0].is_completed());
    assert!(!Rc::ptr_eq(&edited[0], &todos[0]));
    assert!(Rc::ptr_eq(&edited[1], &todos[1]));
    assert!(Rc::ptr_eq(&edited[2], &todos[2]));
    assert_eq!(todos[0].description(), "hi");
}

#[test]
fn without_completed() {
    let todos = mixed().without_completed();
    let ids: Vec<_> = todos.iter().map(|t| t.id().as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn with_all_completed_shares_unchanged_items() {
    let todos = mixed();
    let all = todos.with_all_completed(true);
    assert!(all.iter().all(|t| t.is_completed()));
    assert!(!Rc::ptr_eq(&all[0], &todos[0]));
    assert!(Rc::ptr_eq(&all[1], &todos[1]));
}

#[test]
fn serde() {
    let todos = Todos::seed().toggled(&id("todo-2"));
    let json = serde_json::to_string(&todos).unwrap();
    assert_eq!(
        json,
        r#"[{"id":"todo-0","description":"hi","completed":false},{"id":"todo-1","description":"hello","completed":false},{"id":"todo-2","description":"bonjour","completed":true}]"#
    );
    let back: Todos = serde_json::from_str(&json).unwrap();
    assert_eq!(back, todos);
}
