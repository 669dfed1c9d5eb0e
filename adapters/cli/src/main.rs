#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for planning kitchens and exchanging share links.

mod config;
mod ops;
mod report;
mod share;

use std::{num::NonZeroU32, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kitchen_planner_core::ApplianceCatalog;
use kitchen_planner_layout::Layout;
use kitchen_planner_system_editor::Editor;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::config::PlannerConfig;

/// Plan a grid-based kitchen and share it as a link fragment.
#[derive(Debug, Parser)]
#[command(name = "kitchen-planner", version)]
struct Cli {
    /// Planner configuration file.
    #[arg(long, global = true, env = "KITCHEN_PLANNER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Print the share fragment of an empty kitchen.
    New {
        /// Number of tile rows.
        #[arg(long, default_value = "12")]
        height: NonZeroU32,
        /// Number of tile columns.
        #[arg(long, default_value = "16")]
        width: NonZeroU32,
    },
    /// Apply operations to a shared kitchen and print the new fragment.
    ///
    /// Operations use grid coordinates: `place R C INDEX [DEG]`, `clear R C`,
    /// `wall R C empty|half|full`, `toggle R C`, `swap R1 C1 R2 C2`,
    /// `rotate-left R C`, `rotate-right R C`, `remove-walls`, `remove-squares`.
    Edit {
        /// Share fragment to start from.
        fragment: String,
        /// Operation to apply; all operations form one batch.
        #[arg(long = "op", required = true)]
        ops: Vec<String>,
    },
    /// Summarise a shared kitchen.
    Show {
        /// Share fragment to describe.
        fragment: String,
    },
    /// List the appliances that can be placed.
    Catalog,
}

/// Entry point for the kitchen planner command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PlannerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Action::New { height, width } => {
            config.check_dimensions(height.get(), width.get())?;
            let layout = Layout::new(height, width);
            info!(height = height.get(), width = width.get(), "created empty kitchen");
            println!("{}", share::encode_fragment(&layout));
        }
        Action::Edit { fragment, ops } => {
            let layout = load_shared(&fragment, &config)?;
            let commands = ops::parse_ops(&ops, &config.catalog)?;
            let mut editor = Editor::from_layout(layout, config.history_limit);
            editor
                .apply(&commands)
                .context("could not apply the requested operations")?;
            println!("{}", share::encode_fragment(editor.layout()));
        }
        Action::Show { fragment } => {
            let layout = load_shared(&fragment, &config)?;
            print!("{}", report::describe(&layout, &config.catalog));
        }
        Action::Catalog => {
            for (index, appliance) in config.catalog.appliances().iter().enumerate() {
                println!("{index:>3}  {:<16} {}", appliance.name, appliance.asset);
            }
        }
    }

    Ok(())
}

fn load_shared(fragment: &str, config: &PlannerConfig) -> Result<Layout> {
    let layout = share::decode_fragment(fragment, &config.catalog)
        .context("could not load this layout")?;
    config
        .check_layout(&layout)
        .context("could not load this layout")?;
    Ok(layout)
}
