mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use neo_grid::data::loader;
use neo_grid::{neo_schema, ViewState};

fn main() {
    env_logger::init();

    let args = cli::Cli::parse();

    if let Err(e) = run(args) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: cli::Cli) -> Result<()> {
    let schema = neo_schema();
    let dataset = loader::load_file(&args.path, schema)
        .with_context(|| format!("loading {}", args.path.display()))?;
    log::info!("Loaded {} records from {}", dataset.len(), args.path.display());

    let mut state = ViewState::new(schema);
    for arg in &args.filters {
        let (column, filter) = cli::parse_filter(arg, schema)?;
        state.set_filter(&column, filter)?;
    }
    if let Some(arg) = &args.sort {
        let (column, direction) = cli::parse_sort(arg)?;
        state.set_sort(column, direction)?;
    }
    if let Some(column) = &args.group {
        state.set_group(column)?;
    }

    let view = state.compute_view(&dataset);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", cli::render_table(&view, schema, state.group(), args.limit));
        println!("{} of {} records visible", view.len(), dataset.len());
    }
    Ok(())
}
