mod app;
mod graph;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use app::{AppConfig, GraphExplorerApp, SimulationConfig};

const DEFAULT_GRAPH: &str = "{1: [2], 2: [3], 3: [4], 4: [1]}";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Initial adjacency list, e.g. "{1: [2, 3], 2: [3], 3: []}".
    #[arg(long, default_value = DEFAULT_GRAPH, conflicts_with = "graph_file")]
    graph: String,

    /// Read the initial adjacency list from a file instead.
    #[arg(long)]
    graph_file: Option<PathBuf>,

    /// Start with the light theme.
    #[arg(long)]
    light: bool,

    /// Logical width of the layout area.
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Logical height of the layout area.
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Many-body strength; negative values repel.
    #[arg(long, default_value_t = -400.0, allow_negative_numbers = true)]
    charge: f32,

    /// Rest length of links.
    #[arg(long, default_value_t = 30.0)]
    link_distance: f32,
}

impl Args {
    fn into_config(self) -> Result<AppConfig> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(anyhow!(
                "layout size must be positive, got {}x{}",
                self.width,
                self.height
            ));
        }
        if !self.link_distance.is_finite() || self.link_distance < 0.0 {
            return Err(anyhow!(
                "link distance must be a non-negative number, got {}",
                self.link_distance
            ));
        }

        let initial_text = match &self.graph_file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read graph file {}", path.display()))?,
            None => self.graph,
        };

        Ok(AppConfig {
            initial_text,
            dark: !self.light,
            simulation: SimulationConfig {
                width: self.width,
                height: self.height,
                charge: self.charge,
                link_distance: self.link_distance,
                ..SimulationConfig::default()
            },
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    log::info!(
        "starting with a {}x{} layout area",
        config.simulation.width,
        config.simulation.height
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 880.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Graph Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(GraphExplorerApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to run the window: {error}"))
}
