use eframe::egui::{self, Color32, Sense, Stroke, Ui, vec2};

use super::super::ViewModel;
use super::super::drag::PointerId;
use super::super::render::{CanvasPainter, Frame, RenderAdapter};
use super::super::render_utils::{CanvasView, draw_background, draw_layout_bounds, fade_color};

impl ViewModel {
    fn draw_quadtree_overlay(&self, painter: &egui::Painter, view: CanvasView) {
        for cell in &self.quadtree_cells {
            let min = view.to_screen(cell.center - vec2(cell.half_extent, cell.half_extent));
            let max = view.to_screen(cell.center + vec2(cell.half_extent, cell.half_extent));
            let alpha = if cell.is_leaf { 110 } else { 55 };
            let width = (1.4 - cell.depth as f32 * 0.09).clamp(0.45, 1.4);
            painter.rect_stroke(
                egui::Rect::from_two_pos(min, max),
                0.0,
                Stroke::new(width, Color32::from_rgba_unmultiplied(106, 198, 255, alpha)),
                egui::StrokeKind::Middle,
            );
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        let view = self.canvas_view(rect);

        draw_background(&painter, view, &self.theme);
        if self.show_layout_bounds {
            draw_layout_bounds(&painter, view, &self.theme);
        }

        let events = self.pointer_events(ui, &response, view);
        let matches = self.cached_search_matches();
        self.drag.set_grab_radius(Self::grab_radius(view));

        let Some(simulation) = self.simulation.as_mut() else {
            return;
        };

        if simulation.nodes().is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Type an adjacency list such as {1: [2, 3], 2: [3], 3: []}",
                egui::FontId::proportional(15.0),
                fade_color(self.theme.label, 0.6),
            );
            return;
        }

        for event in events {
            self.drag.handle(event, simulation);
        }

        let dragging = self.drag.is_dragging();
        let ticked = (self.live_physics || dragging) && simulation.step();

        if self.show_quadtree_overlay {
            simulation.quadtree_cells(&mut self.quadtree_cells);
        }

        let hovered = self
            .drag
            .dragged_node(PointerId::MOUSE)
            .or_else(|| self.hovered_node(ui, view));
        self.hovered = hovered;

        if self.show_quadtree_overlay {
            self.draw_quadtree_overlay(&painter, view);
        }

        let Some(simulation) = self.simulation.as_ref() else {
            return;
        };
        let frame = Frame::capture(simulation);
        let mut canvas = CanvasPainter {
            painter: &painter,
            view,
            hovered,
            matches: matches.as_deref(),
        };
        canvas.render(&frame, &self.theme);

        if dragging {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grab);
        }

        if ticked || dragging || (self.live_physics && simulation.is_active()) {
            ui.ctx().request_repaint();
        }
    }
}
