use std::collections::HashSet;
use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::physics::SimNode;
use super::{SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

pub(super) fn search_matches(nodes: &[SimNode], query: &str) -> HashSet<usize> {
    let matcher = SkimMatcherV2::default();
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            fuzzy_match_score(&matcher, &node.id, query).map(|_score| index)
        })
        .collect()
}

impl ViewModel {
    pub(super) fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.seed_revision == self.seed_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let simulation = self.simulation.as_ref()?;
        let matches = Arc::new(search_matches(simulation.nodes(), query));
        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            seed_revision: self.seed_revision,
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }
}
