use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

mod config;

use config::{DEFAULT_CONFIG, load_config};
use mapviz::render_map;
use routegraph::RouteGraph;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a transit map of named locations and the routes between them")]
struct Cli {
    /// Path to the location config file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Output image file, overrides output_filename from the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the projected layout as JSON
    #[arg(long, default_value_t = false)]
    dump_layout: bool,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    let cli = Cli::parse();

    info!("Loading locations from {}", cli.config.display());
    let map_config = load_config(&cli.config)?;
    let output_path = map_config.output_path(cli.output.as_deref());

    let graph = RouteGraph::from_locations(map_config.locations)
        .context("Failed to resolve locations")?;

    if cli.dump_layout {
        let layout = graph.layout(&map_config.viz.route_colors)
            .context("Failed to lay out map")?;
        let json = serde_json::to_string_pretty(&layout)
            .context("Failed to serialize layout")?;
        println!("{}", json);
    }

    let image = render_map(&graph, &map_config.viz)
        .context("Failed to render map")?;

    image.save(&output_path)
        .with_context(|| format!("Failed to save PNG to {:?}", output_path))?;

    info!("Map saved to {}", output_path.display());

    Ok(())
}
