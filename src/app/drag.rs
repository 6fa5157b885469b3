use std::collections::HashMap;

use eframe::egui::Vec2;

use super::physics::Simulation;

pub(in crate::app) const GRAB_RADIUS: f32 = 12.0;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub(in crate::app) struct PointerId(pub u64);

impl PointerId {
    pub(in crate::app) const MOUSE: Self = Self(0);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) enum PointerEventKind {
    Down(Vec2),
    Move(Vec2),
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct PointerEvent {
    pub(in crate::app) pointer: PointerId,
    pub(in crate::app) kind: PointerEventKind,
}

impl PointerEvent {
    pub(in crate::app) fn new(pointer: PointerId, kind: PointerEventKind) -> Self {
        Self { pointer, kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum DragPhase {
    Free,
    Dragging { pointer: PointerId },
}

/// Turns pointer gestures into pins on the simulation.
///
/// Each node is `Free` until a pointer presses on it, then `Dragging` until
/// that pointer is released or cancelled. One pointer holds at most one node
/// and a held node cannot be taken by another pointer.
#[derive(Debug)]
pub(in crate::app) struct DragController {
    grabbed: HashMap<PointerId, usize>,
    grab_radius: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            grabbed: HashMap::new(),
            grab_radius: GRAB_RADIUS,
        }
    }
}

impl DragController {
    pub(in crate::app) fn set_grab_radius(&mut self, radius: f32) {
        if radius.is_finite() && radius > 0.0 {
            self.grab_radius = radius;
        }
    }

    pub(in crate::app) fn phase(&self, node: usize) -> DragPhase {
        self.grabbed
            .iter()
            .find_map(|(&pointer, &index)| (index == node).then_some(DragPhase::Dragging { pointer }))
            .unwrap_or(DragPhase::Free)
    }

    pub(in crate::app) fn is_dragging(&self) -> bool {
        !self.grabbed.is_empty()
    }

    pub(in crate::app) fn dragged_node(&self, pointer: PointerId) -> Option<usize> {
        self.grabbed.get(&pointer).copied()
    }

    pub(in crate::app) fn reset(&mut self) {
        self.grabbed.clear();
    }

    pub(in crate::app) fn handle(&mut self, event: PointerEvent, sim: &mut Simulation) -> bool {
        match event.kind {
            PointerEventKind::Down(point) => self.press(event.pointer, point, sim),
            PointerEventKind::Move(point) => {
                let Some(index) = self.dragged_node(event.pointer) else {
                    return false;
                };
                sim.pin(index, point);
                true
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.release(event.pointer, sim),
        }
    }

    fn press(&mut self, pointer: PointerId, point: Vec2, sim: &mut Simulation) -> bool {
        if self.grabbed.contains_key(&pointer) {
            return false;
        }

        let Some(index) = sim.node_at(point, self.grab_radius) else {
            return false;
        };

        if self.phase(index) != DragPhase::Free {
            return false;
        }

        if self.grabbed.is_empty() {
            sim.begin_drag_heat();
        }
        self.grabbed.insert(pointer, index);
        sim.pin(index, point);

        if let Some(node) = sim.nodes().get(index) {
            log::debug!("dragging node {}", node.id);
        }
        true
    }

    fn release(&mut self, pointer: PointerId, sim: &mut Simulation) -> bool {
        let Some(index) = self.grabbed.remove(&pointer) else {
            return false;
        };

        sim.unpin(index);
        if self.grabbed.is_empty() {
            sim.end_drag_heat();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::app::physics::SimulationConfig;
    use crate::graph::parse_adjacency;

    fn settled(text: &str) -> Simulation {
        let mut sim = Simulation::new(&parse_adjacency(text).unwrap(), SimulationConfig::default());
        while sim.step() {}
        sim
    }

    fn event(pointer: u64, kind: PointerEventKind) -> PointerEvent {
        PointerEvent::new(PointerId(pointer), kind)
    }

    #[test]
    fn press_on_empty_space_grabs_nothing() {
        let mut sim = settled("{1: [2], 2: []}");
        let mut drag = DragController::default();
        let alpha = sim.alpha();

        assert!(!drag.handle(event(0, PointerEventKind::Down(vec2(-900.0, -900.0))), &mut sim));
        assert!(!drag.is_dragging());
        assert_eq!(sim.alpha(), alpha);
        assert!(!sim.is_active());
    }

    #[test]
    fn drag_pins_node_to_pointer_on_every_tick() {
        let mut sim = settled("{1: [2, 3], 2: [3], 3: []}");
        let mut drag = DragController::default();
        let start = sim.nodes()[1].position;

        assert!(drag.handle(event(0, PointerEventKind::Down(start)), &mut sim));
        assert_eq!(
            drag.phase(1),
            DragPhase::Dragging {
                pointer: PointerId(0)
            }
        );
        assert_eq!(drag.phase(0), DragPhase::Free);
        assert!(sim.is_active());

        for step in 0..40 {
            let pointer = start + vec2(step as f32 * 3.0, -(step as f32) * 2.0);
            drag.handle(event(0, PointerEventKind::Move(pointer)), &mut sim);
            assert!(sim.step());
            assert_eq!(sim.nodes()[1].position, pointer);
        }
    }

    #[test]
    fn release_unpins_and_node_moves_again() {
        let mut sim = settled("{1: [2, 3], 2: [3], 3: []}");
        let mut drag = DragController::default();
        let start = sim.nodes()[0].position;
        let far = start + vec2(200.0, 150.0);

        drag.handle(event(0, PointerEventKind::Down(start)), &mut sim);
        drag.handle(event(0, PointerEventKind::Move(far)), &mut sim);
        sim.step();
        assert_eq!(sim.nodes()[0].position, far);

        assert!(drag.handle(event(0, PointerEventKind::Up), &mut sim));
        assert_eq!(drag.phase(0), DragPhase::Free);
        assert_eq!(sim.nodes()[0].pin, None);

        for _ in 0..10 {
            sim.step();
        }
        assert_ne!(sim.nodes()[0].position, far);
    }

    #[test]
    fn cancel_behaves_like_release() {
        let mut sim = settled("{1: [2], 2: []}");
        let mut drag = DragController::default();
        let start = sim.nodes()[0].position;

        drag.handle(event(3, PointerEventKind::Down(start)), &mut sim);
        assert!(drag.handle(event(3, PointerEventKind::Cancel), &mut sim));
        assert!(!drag.is_dragging());
        assert!(sim.nodes().iter().all(|node| node.pin.is_none()));
    }

    #[test]
    fn last_release_lets_alpha_cool_without_new_boost() {
        let mut sim = settled("{1: [2], 2: [3], 3: []}");
        let mut drag = DragController::default();
        let first = sim.nodes()[0].position;
        let third = sim.nodes()[2].position;

        drag.handle(event(0, PointerEventKind::Down(first)), &mut sim);
        let heated = sim.alpha();
        drag.handle(event(1, PointerEventKind::Down(third)), &mut sim);
        assert_eq!(sim.alpha(), heated);

        drag.handle(event(0, PointerEventKind::Up), &mut sim);
        for _ in 0..5 {
            sim.step();
        }
        assert!(sim.alpha() >= heated - 1e-6, "second drag still holds alpha up");

        drag.handle(event(1, PointerEventKind::Up), &mut sim);
        let released = sim.alpha();
        let mut previous = released;
        for _ in 0..20 {
            sim.step();
            assert!(sim.alpha() < previous);
            previous = sim.alpha();
        }
    }

    #[test]
    fn one_node_per_pointer_and_one_pointer_per_node() {
        let mut sim = settled("{1: [2], 2: []}");
        let mut drag = DragController::default();
        let first = sim.nodes()[0].position;
        let second = sim.nodes()[1].position;

        assert!(drag.handle(event(0, PointerEventKind::Down(first)), &mut sim));
        assert!(!drag.handle(event(0, PointerEventKind::Down(second)), &mut sim));
        assert!(!drag.handle(event(1, PointerEventKind::Down(first)), &mut sim));
        assert_eq!(drag.dragged_node(PointerId(0)), Some(0));
        assert_eq!(drag.dragged_node(PointerId(1)), None);
        assert_eq!(sim.nodes()[1].pin, None);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut sim = settled("{1: []}");
        let mut drag = DragController::default();
        assert!(!drag.handle(event(0, PointerEventKind::Move(vec2(1.0, 1.0))), &mut sim));
        assert!(!drag.handle(event(0, PointerEventKind::Up), &mut sim));
        assert_eq!(sim.nodes()[0].pin, None);
    }

    #[test]
    fn reset_forgets_gestures() {
        let mut sim = settled("{1: []}");
        let mut drag = DragController::default();
        let first = sim.nodes()[0].position;
        drag.handle(event(0, PointerEventKind::Down(first)), &mut sim);
        drag.reset();
        assert!(!drag.is_dragging());
        assert_eq!(drag.phase(0), DragPhase::Free);
    }
}
