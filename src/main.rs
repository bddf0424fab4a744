use std::{io::BufRead, path::PathBuf, rc::Rc};

use anyhow::Result;
use clap::Parser;
use todo_state::{AppConfig, Command, Filter, TodoApp, Todos};
use tracing_subscriber::EnvFilter;

/// Line-oriented todo list. Type `list` to redraw, or an action such as `add milk`.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with an empty list.
    #[arg(long)]
    no_seed: bool,

    /// Initial filter: all, active or completed.
    #[arg(long)]
    filter: Option<Filter>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if args.no_seed {
        config.seed = false;
    }
    if let Some(filter) = args.filter {
        config.initial_filter = filter;
    }

    let app = TodoApp::new(&config);
    let views = app.views();
    let _list = views.filtered_todos().subscribe(|todos| print_list(todos));
    let _footer = views.active_count().subscribe(|n| print_footer(**n));

    print_list(&views.filtered_todos().read());
    print_footer(*views.active_count().read());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::List) => {
                print_list(&views.filtered_todos().read());
                print_footer(*views.active_count().read());
            }
            Ok(command) => {
                if let Some(id) = app.apply(command) {
                    println!("added {id}");
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

fn print_list(todos: &Rc<Todos>) {
    if todos.is_empty() {
        println!("(nothing to show)");
    }
    for todo in todos.iter() {
        println!("{todo}");
    }
}

fn print_footer(active: usize) {
    let noun = if active == 1 { "item" } else { "items" };
    println!("{active} {noun} left");
}
