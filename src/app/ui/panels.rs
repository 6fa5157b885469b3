use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::graph::GraphSnapshot;

use super::super::drag::DragController;
use super::super::render::Theme;
use super::super::{AppConfig, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(config: AppConfig) -> Self {
        let mut model = Self {
            input: config.initial_text,
            snapshot: GraphSnapshot::default(),
            parse_error: None,
            simulation: None,
            simulation_config: config.simulation,
            seed_revision: 0,
            drag: DragController::default(),
            theme: Theme::new(config.dark),
            visuals_dirty: false,
            pan: Vec2::ZERO,
            zoom: 1.0,
            hovered: None,
            search: String::new(),
            search_match_cache: None,
            live_physics: true,
            show_quadtree_overlay: false,
            show_layout_bounds: true,
            quadtree_cells: Vec::new(),
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        };
        model.apply_input();
        model
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Graph Explorer");
                    ui.separator();
                    ui.label(format!("nodes: {}", self.snapshot.node_count()));
                    ui.label(format!("links: {}", self.snapshot.link_count()));
                    ui.separator();
                    ui.label(self.simulation_status_text());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
