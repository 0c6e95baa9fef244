use crate::system::SystemModel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered, name-unique collection of systems.
///
/// Insertion order is load-bearing: it is the column order of every
/// combination tuple scored against this collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<SystemModel>", into = "Vec<SystemModel>")]
pub struct MultiSystemModel {
    systems: Vec<SystemModel>,
    index: HashMap<String, usize, ahash::RandomState>,
}

impl MultiSystemModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_systems(systems: Vec<SystemModel>) -> Result<Self> {
        let mut model = Self::new();
        for system in systems {
            model.add(system)?;
        }
        Ok(model)
    }

    pub fn add(&mut self, system: SystemModel) -> Result<()> {
        if self.index.contains_key(system.name()) {
            return Err(Error::DuplicateName(format!("system '{}'", system.name())));
        }
        self.index.insert(system.name().to_string(), self.systems.len());
        self.systems.push(system);
        Ok(())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&SystemModel> {
        self.index.get(name).map(|&i| &self.systems[i])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.systems.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemModel> {
        self.systems.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Rename a system in place, keeping its position
    pub(crate) fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.index.contains_key(new) {
            return Err(Error::DuplicateName(format!("system '{}'", new)));
        }
        let i = self
            .index
            .remove(old)
            .ok_or_else(|| Error::Validation(format!("No system named '{}'", old)))?;
        if let Err(e) = self.systems[i].rename(new) {
            self.index.insert(old.to_string(), i);
            return Err(e);
        }
        self.index.insert(new.to_string(), i);
        Ok(())
    }

    pub fn into_systems(self) -> Vec<SystemModel> {
        self.systems
    }
}

impl PartialEq for MultiSystemModel {
    fn eq(&self, other: &Self) -> bool {
        self.systems == other.systems
    }
}

impl TryFrom<Vec<SystemModel>> for MultiSystemModel {
    type Error = Error;

    fn try_from(systems: Vec<SystemModel>) -> Result<Self> {
        Self::from_systems(systems)
    }
}

impl From<MultiSystemModel> for Vec<SystemModel> {
    fn from(model: MultiSystemModel) -> Self {
        model.systems
    }
}
