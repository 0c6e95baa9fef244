//! Sparse (system, feature) -> selected state assignment

use crate::multi_system::MultiSystemModel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrototypeKey {
    pub system: String,
    pub feature: String,
}

impl PrototypeKey {
    pub fn new(system: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            feature: feature.into(),
        }
    }
}

/// One chosen state per feature across all systems.
///
/// Entries are not checked against any system collection here; orphaned
/// keys survive persistence untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(PrototypeKey, bool)>", into = "Vec<(PrototypeKey, bool)>")]
pub struct Prototype {
    states: BTreeMap<PrototypeKey, bool>,
}

impl Prototype {
    pub fn new() -> Self {
        Self::default()
    }

    /// One unselected entry per feature of every system
    pub fn from_systems(systems: &MultiSystemModel) -> Self {
        let mut prototype = Self::new();
        for system in systems.iter() {
            for feature in system.features() {
                prototype.set(system.name(), feature.as_str(), false);
            }
        }
        prototype
    }

    /// Set a state, returning the previous one
    pub fn set(&mut self, system: impl Into<String>, feature: impl Into<String>, state: bool) -> Option<bool> {
        self.states.insert(PrototypeKey::new(system, feature), state)
    }

    pub fn get(&self, system: &str, feature: &str) -> Option<bool> {
        self.states.get(&PrototypeKey::new(system, feature)).copied()
    }

    pub fn remove(&mut self, system: &str, feature: &str) -> Option<bool> {
        self.states.remove(&PrototypeKey::new(system, feature))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PrototypeKey, bool)> {
        self.states.iter().map(|(k, &v)| (k, v))
    }

    /// Entries of a single system, in feature order of the key
    pub fn system_entries<'a>(&'a self, system: &'a str) -> impl Iterator<Item = (&'a str, bool)> + 'a {
        self.states
            .iter()
            .filter(move |(k, _)| k.system == system)
            .map(|(k, &v)| (k.feature.as_str(), v))
    }

    /// Keys whose system is not part of `systems`
    pub fn orphans<'a>(&'a self, systems: &'a MultiSystemModel) -> impl Iterator<Item = &'a PrototypeKey> + 'a {
        self.states.keys().filter(move |k| !systems.contains(&k.system))
    }

    /// Carry over entries from an older prototype.
    ///
    /// Keys already present here win; keys only the older one has are kept.
    pub fn merge_from(&mut self, older: &Prototype) {
        for (key, &state) in &older.states {
            self.states.entry(key.clone()).or_insert(state);
        }
    }

    /// Whether any entry belongs to `system`
    pub fn contains_system(&self, system: &str) -> bool {
        self.states.keys().any(|k| k.system == system)
    }

    /// Relabel every entry of a system. Fails without changes when `new`
    /// already has entries of its own.
    pub fn rename_system(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.contains_system(new) {
            return Err(Error::DuplicateName(format!("prototype entries of system '{}'", new)));
        }
        let moved: Vec<PrototypeKey> = self.states.keys().filter(|k| k.system == old).cloned().collect();
        for key in moved {
            if let Some(state) = self.states.remove(&key) {
                self.states.insert(PrototypeKey::new(new, key.feature), state);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl From<Vec<(PrototypeKey, bool)>> for Prototype {
    fn from(entries: Vec<(PrototypeKey, bool)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Prototype> for Vec<(PrototypeKey, bool)> {
    fn from(prototype: Prototype) -> Self {
        prototype.states.into_iter().collect()
    }
}

impl FromIterator<(PrototypeKey, bool)> for Prototype {
    fn from_iter<I: IntoIterator<Item = (PrototypeKey, bool)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}
