use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;
use super::{SimLink, SimNode};

const DISTANCE_MIN_SQ: f32 = 1.0;
const JIGGLE: f32 = 1.0e-6;

fn jiggle(seed: usize) -> Vec2 {
    let angle = ((seed as f32) * 0.618_034 + 0.37) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin()) * JIGGLE
}

pub(super) fn apply_links(nodes: &mut [SimNode], links: &[SimLink], distance: f32, alpha: f32) {
    for (index, link) in links.iter().enumerate() {
        if link.source == link.target {
            continue;
        }

        let source = &nodes[link.source];
        let target = &nodes[link.target];
        let mut delta = (target.position + target.velocity) - (source.position + source.velocity);
        if delta.length_sq() <= f32::EPSILON * f32::EPSILON {
            delta = jiggle(index);
        }

        let length = delta.length();
        let correction = delta * ((length - distance) / length * alpha * link.strength);

        nodes[link.target].velocity -= correction * link.bias;
        nodes[link.source].velocity += correction * (1.0 - link.bias);
    }
}

fn charge_between(delta: Vec2, weighted_strength: f32, index: usize, other: usize) -> Vec2 {
    let delta = if delta.length_sq() <= f32::EPSILON * f32::EPSILON {
        let nudge = jiggle(index.min(other).wrapping_mul(31).wrapping_add(index.max(other)));
        if index < other { nudge } else { -nudge }
    } else {
        delta
    };

    let mut distance_sq = delta.length_sq();
    if distance_sq < DISTANCE_MIN_SQ {
        distance_sq = (DISTANCE_MIN_SQ * distance_sq).sqrt();
    }
    delta * (weighted_strength / distance_sq)
}

fn accumulate_charge(
    cell: &QuadNode,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    theta: f32,
    velocity: &mut Vec2,
) {
    if cell.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if cell.is_leaf() {
        for &other in &cell.indices {
            if other != index {
                *velocity += charge_between(positions[other] - point, strength, index, other);
            }
        }
        return;
    }

    let delta = cell.center_of_mass - point;
    let distance = delta.length().max(0.0001);
    if !cell.bounds.contains(point) && cell.bounds.side_length() / distance < theta {
        *velocity += charge_between(delta, strength * cell.mass, index, usize::MAX);
        return;
    }

    for child in cell.children.iter().flatten() {
        accumulate_charge(child, index, positions, strength, theta, velocity);
    }
}

pub(super) fn apply_many_body(
    nodes: &mut [SimNode],
    positions: &mut Vec<Vec2>,
    strength: f32,
    theta: f32,
    alpha: f32,
) {
    positions.clear();
    positions.extend(nodes.iter().map(|node| node.position));

    let Some(tree) = QuadNode::build(positions) else {
        return;
    };

    let weighted = strength * alpha;
    for (index, node) in nodes.iter_mut().enumerate() {
        accumulate_charge(&tree, index, positions, weighted, theta, &mut node.velocity);
    }
}

pub(super) fn apply_centering(nodes: &mut [SimNode], center: Vec2) {
    if nodes.is_empty() {
        return;
    }

    let mean = nodes
        .iter()
        .fold(Vec2::ZERO, |sum, node| sum + node.position)
        / nodes.len() as f32;
    let shift = mean - center;
    for node in nodes {
        node.position -= shift;
    }
}
