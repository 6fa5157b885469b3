use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use eframe::egui::{Context, Vec2, Visuals};

use crate::graph::{GraphSnapshot, ParseError};

mod drag;
mod graph;
mod highlight;
mod physics;
mod render;
mod render_utils;
mod ui;

use drag::DragController;
use physics::{QuadtreeCell, Simulation};
pub use physics::SimulationConfig;
use render::Theme;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub initial_text: String,
    pub dark: bool,
    pub simulation: SimulationConfig,
}

pub struct GraphExplorerApp {
    model: ViewModel,
}

struct ViewModel {
    input: String,
    snapshot: GraphSnapshot,
    parse_error: Option<ParseError>,
    simulation: Option<Simulation>,
    simulation_config: SimulationConfig,
    seed_revision: u64,
    drag: DragController,
    theme: Theme,
    visuals_dirty: bool,
    pan: Vec2,
    zoom: f32,
    hovered: Option<usize>,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    live_physics: bool,
    show_quadtree_overlay: bool,
    show_layout_bounds: bool,
    quadtree_cells: Vec<QuadtreeCell>,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

struct SearchMatchCache {
    query: String,
    seed_revision: u64,
    matches: Arc<HashSet<usize>>,
}

impl GraphExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let model = ViewModel::new(config);
        cc.egui_ctx.set_visuals(Self::visuals(model.theme.dark));
        Self { model }
    }

    fn visuals(dark: bool) -> Visuals {
        if dark { Visuals::dark() } else { Visuals::light() }
    }
}

impl eframe::App for GraphExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.model.visuals_dirty {
            ctx.set_visuals(Self::visuals(self.model.theme.dark));
            self.model.visuals_dirty = false;
        }
        self.model.show(ctx);
    }
}
