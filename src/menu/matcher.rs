use std::collections::HashMap;

use tracing::debug;

use super::distance::distance;
use super::model::MenuItem;

/// Typos tolerated when falling back to edit distance.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Catalog view with a name index, built once per parse or recommendation call.
pub struct MenuIndex<'a> {
    catalog: &'a [MenuItem],
    by_name: HashMap<&'a str, &'a MenuItem>,
    max_distance: usize,
}

impl<'a> MenuIndex<'a> {
    pub fn new(catalog: &'a [MenuItem]) -> Self {
        Self::with_max_distance(catalog, DEFAULT_MAX_DISTANCE)
    }

    pub fn with_max_distance(catalog: &'a [MenuItem], max_distance: usize) -> Self {
        let mut by_name = HashMap::with_capacity(catalog.len());
        for item in catalog {
            by_name.entry(item.name.as_str()).or_insert(item);
        }
        Self {
            catalog,
            by_name,
            max_distance,
        }
    }

    pub fn catalog(&self) -> &'a [MenuItem] {
        self.catalog
    }

    pub fn get(&self, name: &str) -> Option<&'a MenuItem> {
        self.by_name.get(name).copied()
    }

    /// Resolves free text to a known menu: exact, then containment in either
    /// direction, then the closest name within `max_distance` edits.
    /// Ties keep catalog order.
    pub fn resolve(&self, candidate: &str) -> Option<&'a MenuItem> {
        if candidate.is_empty() {
            return None;
        }

        if let Some(item) = self.get(candidate) {
            return Some(item);
        }

        if let Some(item) = self
            .catalog
            .iter()
            .find(|m| m.name.contains(candidate) || candidate.contains(m.name.as_str()))
        {
            debug!(menu = %item.name, input = %candidate, "partial match");
            return Some(item);
        }

        let mut best: Option<(&'a MenuItem, usize)> = None;
        for item in self.catalog {
            let d = distance(candidate, &item.name);
            if d <= self.max_distance && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((item, d));
            }
        }
        if let Some((item, d)) = best {
            debug!(menu = %item.name, distance = d, input = %candidate, "fuzzy match");
        }
        best.map(|(item, _)| item)
    }
}

pub fn resolve<'a>(candidate: &str, catalog: &'a [MenuItem]) -> Option<&'a MenuItem> {
    MenuIndex::new(catalog).resolve(candidate)
}
