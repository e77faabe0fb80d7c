use std::collections::BTreeMap;

use crate::model::ModelDescriptor;

/// Which models the operator has switched on.
///
/// Seeded from the catalog defaults and keyed by model id; the catalog
/// descriptors themselves are never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelActivity {
    active: BTreeMap<String, bool>,
}

impl ModelActivity {
    pub fn from_catalog(models: &[ModelDescriptor]) -> Self {
        let mut activity = Self::default();
        activity.sync(models);
        activity
    }

    /// Add catalog defaults for ids not seen yet; existing toggles are kept.
    pub fn sync(&mut self, models: &[ModelDescriptor]) {
        for m in models {
            self.active.entry(m.id.clone()).or_insert(m.is_active);
        }
    }

    pub fn is_active(&self, model_id: &str) -> bool {
        self.active.get(model_id).copied().unwrap_or(false)
    }

    /// Flip a model and return its new state, or `None` for an unknown id.
    pub fn toggle(&mut self, model_id: &str) -> Option<bool> {
        let slot = self.active.get_mut(model_id)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn set_active(&mut self, model_id: &str, active: bool) -> bool {
        let Some(slot) = self.active.get_mut(model_id) else {
            return false;
        };
        *slot = active;
        true
    }

    pub fn active_count(&self) -> usize {
        self.active.values().filter(|&&on| on).count()
    }

    /// Active ids in lexical order.
    pub fn active_ids(&self) -> Vec<String> {
        self.active
            .iter()
            .filter_map(|(id, &on)| on.then(|| id.clone()))
            .collect()
    }
}
