#![forbid(unsafe_code)]

//! # Tabula CLI
//!
//! Drives the table engine over JSON records from the command line.
//!
//! ## Usage
//!
//! ```bash
//! tabula --config table.toml --data partners.json            # Print page 1
//! tabula -c table.toml -d partners.json --sort name --page 2  # Sorted, page 2
//! tabula -c table.toml -d partners.json --export csv -o out   # Write out/<name>.csv
//! ```

mod cli;

use anyhow::{Context, bail};
use tabula::prelude::*;
use tabula::schema::load_records_from_path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli);

    let definition = TableDefinition::from_path(&cli.config)
        .with_context(|| format!("failed to load table definition {}", cli.config.display()))?;
    let records = load_records_from_path(&cli.data)
        .with_context(|| format!("failed to load records {}", cli.data.display()))?;
    info!(
        columns = definition.columns.len(),
        rows = records.len(),
        "table loaded"
    );

    let mut table = definition.build_table(records);
    apply_arguments(&mut table, &cli);

    let Some(kind) = cli.export else {
        println!("{}", table.view());
        return Ok(());
    };

    let mut sink = DirectorySink::new(&cli.out_dir);
    match table.export_to(kind.into(), &mut sink)? {
        Some(path) => println!("{}", path.display()),
        None => bail!(
            "export is disabled; set options.enable_export in {}",
            cli.config.display()
        ),
    }
    Ok(())
}

/// Replays the command-line arguments as table actions.
///
/// Page size goes first because it resets the page; sorting keeps the page,
/// so `--page` may come after it.
fn apply_arguments(table: &mut Table<JsonRecord>, cli: &Cli) {
    if let Some(size) = cli.page_size {
        table.set_page_size(size);
    }
    for key in &cli.sort {
        table.sort_by(key);
    }
    if let Some(page) = cli.page {
        table.set_page(page);
    }
    for key in &cli.select {
        table.toggle_row_selection(key.as_str());
    }
    if cli.select_page {
        table.toggle_select_all_visible();
    }

    info!(
        sort = ?table.sort_state(),
        page = %table.page_label(),
        selected = table.selected_keys().len(),
        "arguments applied"
    );
}

fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
