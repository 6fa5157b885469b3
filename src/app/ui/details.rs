use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;
use super::super::drag::DragPhase;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Nodes");
        ui.add_space(6.0);

        let Some(simulation) = self.simulation.as_ref() else {
            ui.label("No graph has been parsed yet.");
            return;
        };

        if simulation.nodes().is_empty() {
            ui.label("The graph is empty.");
            return;
        }

        let mut degree = vec![0usize; simulation.nodes().len()];
        for link in simulation.links() {
            degree[link.source] += 1;
            degree[link.target] += 1;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("node_table")
                .striped(true)
                .num_columns(4)
                .show(ui, |ui| {
                    ui.label(RichText::new("id").strong());
                    ui.label(RichText::new("degree").strong());
                    ui.label(RichText::new("position").strong());
                    ui.label(RichText::new("state").strong());
                    ui.end_row();

                    for (index, node) in simulation.nodes().iter().enumerate() {
                        let id = RichText::new(node.id.as_str()).monospace();
                        if self.hovered == Some(index) {
                            ui.label(id.strong());
                        } else {
                            ui.label(id);
                        }
                        ui.label(degree[index].to_string());
                        ui.label(format!("{:.0}, {:.0}", node.position.x, node.position.y));
                        ui.label(match self.drag.phase(index) {
                            DragPhase::Free => "free",
                            DragPhase::Dragging { .. } => "dragging",
                        });
                        ui.end_row();
                    }
                });
        });
    }
}
