use eframe::egui::{self, PointerButton, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::drag::{PointerEvent, PointerEventKind, PointerId};
use super::super::render_utils::CanvasView;

#[derive(Clone, Copy, Debug, Default)]
struct PrimaryInput {
    pressed: bool,
    released: bool,
    down: bool,
    position: Option<Pos2>,
}

/// The press itself grabs, at the pointer's position on that frame, so a
/// click that never becomes an egui drag still pins the node under it.
fn primary_gesture(
    input: PrimaryInput,
    hovered: bool,
    held: bool,
    view: CanvasView,
) -> Vec<PointerEvent> {
    let pointer = PointerId::MOUSE;
    let mut events = Vec::new();

    if input.pressed
        && hovered
        && !held
        && let Some(position) = input.position
    {
        events.push(PointerEvent::new(
            pointer,
            PointerEventKind::Down(view.to_world(position)),
        ));
        return events;
    }

    if !held {
        return events;
    }

    if input.down
        && let Some(position) = input.position
    {
        events.push(PointerEvent::new(
            pointer,
            PointerEventKind::Move(view.to_world(position)),
        ));
    } else if input.released {
        events.push(PointerEvent::new(pointer, PointerEventKind::Up));
    } else if !input.down {
        events.push(PointerEvent::new(pointer, PointerEventKind::Cancel));
    }

    events
}

impl ViewModel {
    pub(in crate::app) fn layout_size(&self) -> Vec2 {
        egui::vec2(self.simulation_config.width, self.simulation_config.height)
    }

    pub(in crate::app) fn canvas_view(&self, rect: Rect) -> CanvasView {
        CanvasView::fit(rect, self.layout_size(), self.pan, self.zoom)
    }

    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = self.canvas_view(rect).to_world(pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.1, 8.0);

        let unpanned = CanvasView::fit(rect, self.layout_size(), Vec2::ZERO, self.zoom);
        self.pan = pointer - unpanned.to_screen(world_before);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub(in crate::app) fn pointer_events(
        &self,
        ui: &Ui,
        response: &egui::Response,
        view: CanvasView,
    ) -> Vec<PointerEvent> {
        let input = ui.input(|input| PrimaryInput {
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            down: input.pointer.primary_down(),
            position: input.pointer.interact_pos(),
        });
        let held = self.drag.dragged_node(PointerId::MOUSE).is_some();
        primary_gesture(input, response.hovered(), held, view)
    }

    pub(in crate::app) fn hovered_node(&self, ui: &Ui, view: CanvasView) -> Option<usize> {
        let simulation = self.simulation.as_ref()?;
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !view.rect.contains(pointer) {
            return None;
        }
        simulation.node_at(view.to_world(pointer), Self::grab_radius(view))
    }

    pub(in crate::app) fn grab_radius(view: CanvasView) -> f32 {
        12.0 / view.scale
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn view() -> CanvasView {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        CanvasView::fit(rect, vec2(800.0, 600.0), Vec2::ZERO, 1.0)
    }

    fn kinds(events: Vec<PointerEvent>) -> Vec<PointerEventKind> {
        events.into_iter().map(|event| event.kind).collect()
    }

    #[test]
    fn press_without_movement_grabs_at_current_position() {
        let input = PrimaryInput {
            pressed: true,
            down: true,
            position: Some(Pos2::new(120.0, 80.0)),
            ..PrimaryInput::default()
        };
        assert_eq!(
            kinds(primary_gesture(input, true, false, view())),
            vec![PointerEventKind::Down(vec2(120.0, 80.0))]
        );
    }

    #[test]
    fn press_outside_the_canvas_is_ignored() {
        let input = PrimaryInput {
            pressed: true,
            down: true,
            position: Some(Pos2::new(120.0, 80.0)),
            ..PrimaryInput::default()
        };
        assert!(primary_gesture(input, false, false, view()).is_empty());
    }

    #[test]
    fn held_node_follows_then_releases() {
        let moving = PrimaryInput {
            down: true,
            position: Some(Pos2::new(300.0, 200.0)),
            ..PrimaryInput::default()
        };
        assert_eq!(
            kinds(primary_gesture(moving, false, true, view())),
            vec![PointerEventKind::Move(vec2(300.0, 200.0))]
        );

        let released = PrimaryInput {
            released: true,
            position: Some(Pos2::new(300.0, 200.0)),
            ..PrimaryInput::default()
        };
        assert_eq!(
            kinds(primary_gesture(released, true, true, view())),
            vec![PointerEventKind::Up]
        );

        let lost = PrimaryInput::default();
        assert_eq!(
            kinds(primary_gesture(lost, false, true, view())),
            vec![PointerEventKind::Cancel]
        );
    }

    #[test]
    fn nothing_is_sent_while_no_node_is_held() {
        let moving = PrimaryInput {
            down: true,
            position: Some(Pos2::new(10.0, 10.0)),
            ..PrimaryInput::default()
        };
        assert!(primary_gesture(moving, true, false, view()).is_empty());
    }
}
