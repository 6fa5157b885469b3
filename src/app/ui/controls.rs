use eframe::egui::{self, RichText, TextEdit, Ui};

use super::super::ViewModel;
use super::super::render::Theme;

const PRESETS: &[(&str, &str)] = &[
    ("Square", "{1: [2], 2: [3], 3: [4], 4: [1]}"),
    ("Triangle", "{1: [2, 3], 2: [3], 3: []}"),
    ("Star", "{1: [2, 3, 4, 5, 6, 7], 2: [], 3: [], 4: [], 5: [], 6: [], 7: []}"),
    (
        "Ladder",
        "{1: [2, 5], 2: [3, 6], 3: [4, 7], 4: [8], 5: [6], 6: [7], 7: [8], 8: []}",
    ),
    (
        "Two rings",
        "{1: [2], 2: [3], 3: [4], 4: [1], 5: [6], 6: [7], 7: [8], 8: [5], 9: [1, 5]}",
    ),
];

impl ViewModel {
    pub(in crate::app) fn set_dark(&mut self, dark: bool) {
        if self.theme.dark != dark {
            self.theme = Theme::new(dark);
            self.visuals_dirty = true;
        }
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Adjacency list");
        ui.separator();
        ui.add_space(4.0);

        let editor = ui
            .add(
                TextEdit::multiline(&mut self.input)
                    .code_editor()
                    .desired_rows(10)
                    .desired_width(f32::INFINITY)
                    .hint_text("{1: [2, 3], 2: [3], 3: []}"),
            )
            .on_hover_text("Keys are nodes; each list names the neighbors a key links to.");
        if editor.changed() {
            self.apply_input();
        }

        match &self.parse_error {
            Some(error) => {
                ui.colored_label(ui.visuals().error_fg_color, format!("Not applied: {error}"));
            }
            None => {
                ui.label(format!(
                    "{} nodes, {} links, {} isolated",
                    self.snapshot.node_count(),
                    self.snapshot.link_count(),
                    self.snapshot.isolated_count()
                ));
            }
        }

        ui.add_space(4.0);
        ui.label(RichText::new("Examples").strong());
        ui.horizontal_wrapped(|ui| {
            for (name, text) in PRESETS {
                if ui.button(*name).clicked() {
                    self.input = (*text).to_owned();
                    self.apply_input();
                }
            }
        });

        ui.separator();
        ui.label("Search nodes")
            .on_hover_text("Fuzzy-highlight nodes whose id matches.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();
        let mut dark = self.theme.dark;
        if ui.checkbox(&mut dark, "Dark theme").changed() {
            self.set_dark(dark);
        }
        ui.checkbox(&mut self.live_physics, "Live physics")
            .on_hover_text("Pause ticking. Dragging still moves the held node.");
        ui.checkbox(&mut self.show_layout_bounds, "Show layout area");
        ui.checkbox(&mut self.show_quadtree_overlay, "Show Barnes–Hut quadtree");

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let can_reheat = self
                .simulation
                .as_ref()
                .is_some_and(|simulation| !simulation.nodes().is_empty());
            if ui
                .add_enabled(can_reheat, egui::Button::new("Reheat"))
                .on_hover_text("Restart the layout from full energy.")
                .clicked()
            {
                self.reheat();
            }
            if ui.button("Reset view").clicked() {
                self.reset_view();
            }
        });

        ui.add_space(8.0);
        ui.small("Drag nodes with the left button, pan with the right or middle button, zoom with the wheel.");
    }
}
