use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 4;
const MAX_DEPTH: usize = 12;

#[derive(Clone, Copy, Debug)]
pub(super) struct QuadBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl QuadBounds {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), point| (min.min(*point), max.max(*point)),
        );

        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }

        let span = (max - min).max_elem().max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: span * 0.5 + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    fn quadrant_of(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }

    fn quadrant(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let sign_x = if quadrant & 1 == 0 { -1.0 } else { 1.0 };
        let sign_y = if quadrant & 2 == 0 { -1.0 } else { 1.0 };
        Self {
            center: self.center + vec2(sign_x * quarter, sign_y * quarter),
            half_extent: quarter,
        }
    }
}

/// Barnes–Hut cell. Every body carries the same charge, so `mass` is simply
/// the number of bodies below this cell.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) center_of_mass: Vec2,
    pub(super) mass: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct QuadtreeCell {
    pub center: Vec2,
    pub half_extent: f32,
    pub depth: usize,
    pub is_leaf: bool,
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::enclosing(positions)?;
        Some(Self::subdivide(
            bounds,
            (0..positions.len()).collect(),
            positions,
            0,
        ))
    }

    fn subdivide(bounds: QuadBounds, indices: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mass = indices.len() as f32;
        let center_of_mass = if indices.is_empty() {
            bounds.center
        } else {
            indices
                .iter()
                .fold(Vec2::ZERO, |sum, &index| sum + positions[index])
                / mass
        };

        let mut node = Self {
            bounds,
            center_of_mass,
            mass,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
            return node;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &index in &node.indices {
            buckets[bounds.quadrant_of(positions[index])].push(index);
        }

        // Coincident bodies cannot be separated by splitting further.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                node.children[quadrant] = Some(Box::new(Self::subdivide(
                    bounds.quadrant(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        node.indices.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub(super) fn collect_cells(&self, depth: usize, cells: &mut Vec<QuadtreeCell>) {
        cells.push(QuadtreeCell {
            center: self.bounds.center,
            half_extent: self.bounds.half_extent,
            depth,
            is_leaf: self.is_leaf(),
        });
        for child in self.children.iter().flatten() {
            child.collect_cells(depth + 1, cells);
        }
    }
}
