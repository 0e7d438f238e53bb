//! Department parent/child hierarchy with explicit cycle handling.
//!
//! The HR platform does not guarantee that parent links form a forest, so
//! every walk here is bounded and reports cycles instead of looping.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use peoplegraph_domain::constants::MAX_HIERARCHY_DEPTH;
use peoplegraph_domain::{Department, PeopleGraphError, Resource, Result};

/// Parent map of departments keyed by department id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentHierarchy {
    parents: BTreeMap<String, Option<String>>,
}

impl DepartmentHierarchy {
    /// Build from raw department records; later duplicates win
    pub fn from_departments<'a>(departments: impl IntoIterator<Item = &'a Department>) -> Self {
        let parents = departments
            .into_iter()
            .map(|dept| (dept.zoho_id.to_string(), dept.parent_id().map(str::to_string)))
            .collect();
        Self { parents }
    }

    /// Build from mapped department resources
    pub fn from_resources<'a>(resources: impl IntoIterator<Item = &'a Resource>) -> Self {
        let parents = resources
            .into_iter()
            .map(|res| {
                let parent = res.parent_resource_id.as_ref().map(|p| p.resource.clone());
                (res.id.resource.clone(), parent)
            })
            .collect();
        Self { parents }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    #[must_use]
    pub fn parent(&self, id: &str) -> Option<&str> {
        self.parents.get(id).and_then(|p| p.as_deref())
    }

    /// Departments without a parent link
    #[must_use]
    pub fn roots(&self) -> Vec<&str> {
        self.parents
            .iter()
            .filter(|(_, parent)| parent.is_none())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Direct children of `id`
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.parents
            .iter()
            .filter(|(_, parent)| parent.as_deref() == Some(id))
            .map(|(child, _)| child.as_str())
            .collect()
    }

    /// Ancestors of `id`, nearest first.
    ///
    /// A parent id that is not itself a known department ends the walk after
    /// being reported.
    ///
    /// # Errors
    /// Returns `PeopleGraphError::InvalidInput` when the walk revisits a
    /// department (a cycle) or exceeds the depth bound.
    pub fn ancestors(&self, id: &str) -> Result<Vec<String>> {
        let mut seen: HashSet<&str> = HashSet::from([id]);
        let mut chain = Vec::new();
        let mut current = id;

        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent) {
                return Err(PeopleGraphError::InvalidInput(format!(
                    "department hierarchy cycle detected at '{parent}' while resolving '{id}'"
                )));
            }
            if chain.len() >= MAX_HIERARCHY_DEPTH {
                return Err(PeopleGraphError::InvalidInput(format!(
                    "department hierarchy deeper than {MAX_HIERARCHY_DEPTH} while resolving '{id}'"
                )));
            }
            chain.push(parent.to_string());
            current = parent;
        }

        Ok(chain)
    }

    /// Every distinct cycle of parent links.
    ///
    /// Each cycle is rotated to start at its smallest id so results are
    /// stable across runs.
    #[must_use]
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: BTreeSet<Vec<String>> = BTreeSet::new();
        let mut cleared: HashSet<&str> = HashSet::new();

        for start in self.parents.keys() {
            let mut path: Vec<&str> = Vec::new();
            let mut on_path: HashSet<&str> = HashSet::new();
            let mut current = Some(start.as_str());

            while let Some(node) = current {
                if cleared.contains(node) {
                    break;
                }
                if !on_path.insert(node) {
                    if let Some(pos) = path.iter().position(|n| *n == node) {
                        let mut cycle: Vec<String> =
                            path[pos..].iter().map(|n| (*n).to_string()).collect();
                        if let Some(min_pos) =
                            cycle.iter().enumerate().min_by(|a, b| a.1.cmp(b.1)).map(|(i, _)| i)
                        {
                            cycle.rotate_left(min_pos);
                        }
                        cycles.insert(cycle);
                    }
                    break;
                }
                path.push(node);
                current = self.parent(node);
            }

            cleared.extend(path);
        }

        cycles.into_iter().collect()
    }
}
