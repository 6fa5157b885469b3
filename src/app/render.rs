use std::collections::HashSet;

use eframe::egui::{Align2, Color32, FontId, Painter, Stroke, Vec2, vec2};

use super::physics::Simulation;
use super::render_utils::{CanvasView, blend_color, fade_color};

pub(in crate::app) const NODE_RADIUS: f32 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct Theme {
    pub(in crate::app) dark: bool,
    pub(in crate::app) background: Color32,
    pub(in crate::app) grid: Color32,
    pub(in crate::app) link: Color32,
    pub(in crate::app) node_fill: Color32,
    pub(in crate::app) node_stroke: Color32,
    pub(in crate::app) label: Color32,
    pub(in crate::app) accent: Color32,
}

impl Theme {
    pub(in crate::app) fn new(dark: bool) -> Self {
        if dark {
            Self {
                dark,
                background: Color32::from_rgb(19, 23, 29),
                grid: Color32::from_rgba_unmultiplied(60, 70, 80, 70),
                link: Color32::from_rgba_unmultiplied(153, 153, 153, 153),
                node_fill: Color32::from_rgb(105, 179, 162),
                node_stroke: Color32::from_rgb(19, 23, 29),
                label: Color32::from_gray(230),
                accent: Color32::from_rgb(245, 206, 93),
            }
        } else {
            Self {
                dark,
                background: Color32::WHITE,
                grid: Color32::from_rgba_unmultiplied(200, 205, 212, 90),
                link: Color32::from_rgba_unmultiplied(153, 153, 153, 153),
                node_fill: Color32::from_rgb(105, 179, 162),
                node_stroke: Color32::WHITE,
                label: Color32::from_gray(30),
                accent: Color32::from_rgb(214, 120, 40),
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct FrameNode<'a> {
    pub(in crate::app) id: &'a str,
    pub(in crate::app) position: Vec2,
    pub(in crate::app) pinned: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct FrameLink {
    pub(in crate::app) source: usize,
    pub(in crate::app) target: usize,
    pub(in crate::app) from: Vec2,
    pub(in crate::app) to: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(in crate::app) struct Frame<'a> {
    pub(in crate::app) nodes: Vec<FrameNode<'a>>,
    pub(in crate::app) links: Vec<FrameLink>,
}

fn finite_or(value: Vec2, fallback: Vec2) -> Vec2 {
    vec2(
        if value.x.is_finite() { value.x } else { fallback.x },
        if value.y.is_finite() { value.y } else { fallback.y },
    )
}

impl<'a> Frame<'a> {
    pub(in crate::app) fn capture(sim: &'a Simulation) -> Self {
        let center = sim.center();
        let nodes = sim
            .nodes()
            .iter()
            .map(|node| FrameNode {
                id: node.id.as_str(),
                position: finite_or(node.position, center),
                pinned: node.pin.is_some(),
            })
            .collect::<Vec<_>>();

        let links = sim
            .links()
            .iter()
            .filter(|link| link.source < nodes.len() && link.target < nodes.len())
            .map(|link| FrameLink {
                source: link.source,
                target: link.target,
                from: nodes[link.source].position,
                to: nodes[link.target].position,
            })
            .collect();

        Self { nodes, links }
    }
}

pub(in crate::app) trait RenderAdapter {
    fn render(&mut self, frame: &Frame<'_>, theme: &Theme);
}

pub(in crate::app) struct CanvasPainter<'p> {
    pub(in crate::app) painter: &'p Painter,
    pub(in crate::app) view: CanvasView,
    pub(in crate::app) hovered: Option<usize>,
    pub(in crate::app) matches: Option<&'p HashSet<usize>>,
}

impl CanvasPainter<'_> {
    fn node_radius(&self) -> f32 {
        (NODE_RADIUS * self.view.scale.powf(0.6)).clamp(3.0, 24.0)
    }
}

impl RenderAdapter for CanvasPainter<'_> {
    fn render(&mut self, frame: &Frame<'_>, theme: &Theme) {
        let searching = self.matches.is_some_and(|matches| !matches.is_empty());
        let is_match = |index: usize| self.matches.is_some_and(|matches| matches.contains(&index));
        let touches_hovered = |link: &FrameLink| {
            self.hovered
                .is_some_and(|hovered| link.source == hovered || link.target == hovered)
        };

        let link_width = (1.5 * self.view.scale.sqrt()).clamp(0.8, 3.5);
        for link in &frame.links {
            let color = if touches_hovered(link) {
                theme.accent
            } else if searching {
                fade_color(theme.link, 0.35)
            } else {
                theme.link
            };
            self.painter.line_segment(
                [self.view.to_screen(link.from), self.view.to_screen(link.to)],
                Stroke::new(link_width, color),
            );
        }

        let radius = self.node_radius();
        let font = FontId::proportional((11.0 * self.view.scale.sqrt()).clamp(9.0, 18.0));
        for (index, node) in frame.nodes.iter().enumerate() {
            let position = self.view.to_screen(node.position);
            let hovered = self.hovered == Some(index);

            let fill = if hovered || node.pinned {
                theme.accent
            } else if is_match(index) {
                blend_color(theme.node_fill, theme.accent, 0.55)
            } else if searching {
                fade_color(theme.node_fill, 0.4)
            } else {
                theme.node_fill
            };

            let drawn_radius = if hovered || node.pinned {
                radius * 1.4
            } else {
                radius
            };
            self.painter.circle_filled(position, drawn_radius, fill);
            self.painter
                .circle_stroke(position, drawn_radius, Stroke::new(1.5, theme.node_stroke));

            self.painter.text(
                position + vec2(drawn_radius + 4.0, 0.0),
                Align2::LEFT_CENTER,
                node.id,
                font.clone(),
                theme.label,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::physics::SimulationConfig;
    use crate::graph::parse_adjacency;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vec<Vec2>, Vec<(Vec2, Vec2)>, bool)>,
    }

    impl RenderAdapter for Recorder {
        fn render(&mut self, frame: &Frame<'_>, theme: &Theme) {
            self.frames.push((
                frame.nodes.iter().map(|node| node.position).collect(),
                frame.links.iter().map(|link| (link.from, link.to)).collect(),
                theme.dark,
            ));
        }
    }

    fn simulation(text: &str) -> Simulation {
        Simulation::new(&parse_adjacency(text).unwrap(), SimulationConfig::default())
    }

    #[test]
    fn link_endpoints_follow_node_positions() {
        let mut sim = simulation("{1: [2, 3], 2: [3], 3: []}");
        sim.step();
        let frame = Frame::capture(&sim);
        assert_eq!(frame.nodes.len(), 3);
        assert_eq!(frame.links.len(), 3);
        for link in &frame.links {
            assert_eq!(link.from, frame.nodes[link.source].position);
            assert_eq!(link.to, frame.nodes[link.target].position);
        }
        assert_eq!(frame.nodes[0].id, "1");
    }

    #[test]
    fn frame_before_first_tick_is_finite() {
        let sim = simulation("{1: [2], 2: []}");
        let frame = Frame::capture(&sim);
        for node in &frame.nodes {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }

    #[test]
    fn non_finite_coordinates_fall_back_to_center() {
        let mut sim = simulation("{1: []}");
        sim.pin(0, vec2(f32::NAN, 42.0));
        sim.step();
        let frame = Frame::capture(&sim);
        assert_eq!(frame.nodes[0].position, vec2(sim.center().x, 42.0));
        assert!(frame.nodes[0].pinned);
    }

    #[test]
    fn theme_changes_colours_but_not_positions() {
        let mut dark_sim = simulation("{1: [2], 2: [3], 3: []}");
        let mut light_sim = simulation("{1: [2], 2: [3], 3: []}");
        let mut recorder = Recorder::default();
        let dark = Theme::new(true);
        let light = Theme::new(false);
        assert_ne!(dark.background, light.background);

        for _ in 0..30 {
            dark_sim.step();
            light_sim.step();
            recorder.render(&Frame::capture(&dark_sim), &dark);
            recorder.render(&Frame::capture(&light_sim), &light);
        }

        for pair in recorder.frames.chunks(2) {
            assert_eq!(pair[0].0, pair[1].0);
            assert_eq!(pair[0].1, pair[1].1);
            assert!(pair[0].2 && !pair[1].2);
        }
    }

    #[test]
    fn empty_simulation_gives_empty_frame() {
        let sim = simulation("");
        assert_eq!(Frame::capture(&sim), Frame::default());
    }
}
