use crate::graph::{GraphSnapshot, parse_adjacency};

use super::super::ViewModel;
use super::super::physics::Simulation;

impl ViewModel {
    pub(in crate::app) fn apply_input(&mut self) {
        match parse_adjacency(&self.input) {
            Ok(snapshot) => {
                self.parse_error = None;
                if self.simulation.is_none() || snapshot != self.snapshot {
                    self.reseed(snapshot);
                }
            }
            Err(error) => {
                log::warn!("graph input rejected: {error}");
                self.parse_error = Some(error);
            }
        }
    }

    pub(in crate::app) fn reseed(&mut self, snapshot: GraphSnapshot) {
        self.simulation = None;
        self.drag.reset();
        self.hovered = None;
        self.search_match_cache = None;
        self.seed_revision = self.seed_revision.wrapping_add(1);

        log::info!(
            "re-seeding layout: {} nodes, {} links",
            snapshot.node_count(),
            snapshot.link_count()
        );
        self.simulation = Some(Simulation::new(&snapshot, self.simulation_config));
        self.snapshot = snapshot;
    }

    pub(in crate::app) fn reheat(&mut self) {
        if let Some(simulation) = self.simulation.as_mut() {
            simulation.reheat();
        }
    }
}
