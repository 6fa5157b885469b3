mod forces;
mod quadtree;

use std::collections::HashMap;
use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use crate::graph::GraphSnapshot;
use forces::{apply_centering, apply_links, apply_many_body};
use quadtree::QuadNode;
pub(in crate::app) use quadtree::QuadtreeCell;

const INITIAL_RADIUS: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    /// Many-body strength; negative repels.
    pub charge: f32,
    pub link_distance: f32,
    /// Barnes–Hut opening angle.
    pub theta: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
    /// Level alpha is held at while a node is dragged.
    pub drag_alpha_target: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            width: 800.0,
            height: 600.0,
            charge: -400.0,
            link_distance: 30.0,
            theta: 0.9,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
        }
    }
}

#[derive(Clone, Debug)]
pub(in crate::app) struct SimNode {
    pub(in crate::app) id: String,
    pub(in crate::app) position: Vec2,
    pub(in crate::app) velocity: Vec2,
    /// While set the node sits exactly here, whatever the forces say.
    pub(in crate::app) pin: Option<Vec2>,
}

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct SimLink {
    pub(in crate::app) source: usize,
    pub(in crate::app) target: usize,
    pub(in crate::app) strength: f32,
    pub(in crate::app) bias: f32,
}

pub(in crate::app) struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    config: SimulationConfig,
    alpha: f32,
    alpha_target: f32,
    ticks: u64,
    positions_scratch: Vec<Vec2>,
}

fn seed_position(index: usize, center: Vec2) -> Vec2 {
    let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
    let angle = index as f32 * PI * (3.0 - 5.0_f32.sqrt());
    center + vec2(radius * angle.cos(), radius * angle.sin())
}

impl Simulation {
    pub(in crate::app) fn new(snapshot: &GraphSnapshot, config: SimulationConfig) -> Self {
        let center = vec2(config.width * 0.5, config.height * 0.5);

        let mut index_by_id = HashMap::with_capacity(snapshot.nodes.len());
        let mut nodes = Vec::with_capacity(snapshot.nodes.len());
        for node in &snapshot.nodes {
            if index_by_id.contains_key(&node.id) {
                continue;
            }
            let index = nodes.len();
            index_by_id.insert(node.id.clone(), index);
            nodes.push(SimNode {
                id: node.id.clone(),
                position: seed_position(index, center),
                velocity: Vec2::ZERO,
                pin: None,
            });
        }

        let mut resolved = Vec::with_capacity(snapshot.links.len());
        let mut degree = vec![0usize; nodes.len()];
        for link in &snapshot.links {
            if let (Some(&source), Some(&target)) =
                (index_by_id.get(&link.source), index_by_id.get(&link.target))
            {
                degree[source] += 1;
                degree[target] += 1;
                resolved.push((source, target));
            }
        }

        let links = resolved
            .into_iter()
            .map(|(source, target)| {
                let (from, to) = (degree[source] as f32, degree[target] as f32);
                SimLink {
                    source,
                    target,
                    strength: 1.0 / from.min(to),
                    bias: from / (from + to),
                }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "seeded simulation with {} nodes and {} links",
            nodes.len(),
            links.len()
        );

        Self {
            nodes,
            links,
            config,
            alpha: 1.0,
            alpha_target: 0.0,
            ticks: 0,
            positions_scratch: Vec::new(),
        }
    }

    pub(in crate::app) fn center(&self) -> Vec2 {
        vec2(self.config.width * 0.5, self.config.height * 0.5)
    }

    pub(in crate::app) fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub(in crate::app) fn links(&self) -> &[SimLink] {
        &self.links
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        !self.nodes.is_empty()
            && (self.alpha >= self.config.alpha_min || self.alpha_target >= self.config.alpha_min)
    }

    /// Advances one tick. Returns `false` without touching any state when the
    /// engine is idle.
    pub(in crate::app) fn step(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        let alpha = self.alpha;

        apply_links(&mut self.nodes, &self.links, self.config.link_distance, alpha);
        apply_many_body(
            &mut self.nodes,
            &mut self.positions_scratch,
            self.config.charge,
            self.config.theta,
            alpha,
        );
        let center = self.center();
        apply_centering(&mut self.nodes, center);

        let retain = 1.0 - self.config.velocity_decay;
        for node in &mut self.nodes {
            match node.pin {
                Some(pin) => {
                    node.position = pin;
                    node.velocity = Vec2::ZERO;
                }
                None => {
                    node.velocity *= retain;
                    node.position += node.velocity;
                }
            }
        }

        self.ticks += 1;
        true
    }

    pub(in crate::app) fn begin_drag_heat(&mut self) {
        self.alpha_target = self.config.drag_alpha_target;
        self.alpha = self.alpha.max(self.config.drag_alpha_target);
    }

    pub(in crate::app) fn end_drag_heat(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(in crate::app) fn reheat(&mut self) {
        self.alpha = 1.0;
    }

    pub(in crate::app) fn pin(&mut self, index: usize, point: Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = Some(point);
        }
    }

    pub(in crate::app) fn unpin(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = None;
        }
    }

    pub(in crate::app) fn node_at(&self, point: Vec2, radius: f32) -> Option<usize> {
        let radius_sq = radius * radius;
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let distance_sq = (node.position - point).length_sq();
                (distance_sq <= radius_sq).then_some((index, distance_sq))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    pub(in crate::app) fn quadtree_cells(&mut self, cells: &mut Vec<QuadtreeCell>) {
        cells.clear();
        self.positions_scratch.clear();
        self.positions_scratch
            .extend(self.nodes.iter().map(|node| node.position));
        if let Some(tree) = QuadNode::build(&self.positions_scratch) {
            tree.collect_cells(0, cells);
        }
    }
}
