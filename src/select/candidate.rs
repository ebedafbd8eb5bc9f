//! Candidates and the labels shown for them.
//!
//! A candidate pairs a bare name and an optional qualifier (owning
//! environment, workload, task definition) with the value a resolver returns.
//! Labels are derived per resolution call and must be invertible within it.
use super::error::{SelectError, SelectResult};
use std::collections::{BTreeMap, BTreeSet};

/// Resolvable item prior to user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    pub name: String,
    pub qualifier: Option<String>,
    pub value: T,
}

impl<T> Candidate<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
            value,
        }
    }

    pub fn qualified(name: impl Into<String>, qualifier: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            qualifier: Some(qualifier.into()),
            value,
        }
    }

    /// Identity used for de-duplication; the value does not take part.
    pub fn identity(&self) -> (&str, Option<&str>) {
        (self.name.as_str(), self.qualifier.as_deref())
    }

    fn qualified_label(&self) -> String {
        match self.qualifier.as_deref() {
            Some(qualifier) => format!("{} ({qualifier})", self.name),
            None => self.name.clone(),
        }
    }
}

impl Candidate<String> {
    /// Candidate whose value is its own name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }
}

/// When labels embed the qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Qualify {
    /// Only names shared by two or more candidates carry their qualifier.
    #[default]
    Duplicates,
    /// Every candidate with a qualifier shows it.
    Always,
}

/// Ordered, identity-unique candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet<T> {
    items: Vec<Candidate<T>>,
}

impl<T> CandidateSet<T> {
    /// Build a set, keeping the first occurrence of each identity.
    pub fn new(candidates: impl IntoIterator<Item = Candidate<T>>) -> Self {
        let mut seen: BTreeSet<(String, Option<String>)> = BTreeSet::new();
        let mut items = Vec::new();
        for candidate in candidates {
            let key = (candidate.name.clone(), candidate.qualifier.clone());
            if seen.insert(key) {
                items.push(candidate);
            }
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate<T>> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Candidate<T>> {
        self.items
    }

    pub(crate) fn remove(&mut self, idx: usize) -> Candidate<T> {
        self.items.remove(idx)
    }

    /// Render one label per candidate, in candidate order.
    ///
    /// Distinct identities can still render alike, e.g. a bare `a (x)` next to
    /// `a` qualified by `x`. Resolvers reject such sets before prompting.
    pub fn labels(&self, qualify: Qualify) -> Vec<String> {
        let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for candidate in &self.items {
            *name_counts.entry(candidate.name.as_str()).or_default() += 1;
        }
        self.items
            .iter()
            .map(|candidate| {
                let shared = name_counts
                    .get(candidate.name.as_str())
                    .is_some_and(|count| *count > 1);
                match qualify {
                    Qualify::Always => candidate.qualified_label(),
                    Qualify::Duplicates if shared => candidate.qualified_label(),
                    Qualify::Duplicates => candidate.name.clone(),
                }
            })
            .collect()
    }

    /// Position of the candidate rendered as `label`.
    ///
    /// A label that was never offered is an error rather than a silent miss.
    pub fn position_of(&self, label: &str, qualify: Qualify) -> SelectResult<usize> {
        self.labels(qualify)
            .iter()
            .position(|candidate_label| candidate_label == label)
            .ok_or_else(|| SelectError::UnknownChoice {
                label: label.to_string(),
            })
    }

    /// Reverse a chosen label back to its candidate.
    pub fn unlabel(&self, label: &str, qualify: Qualify) -> SelectResult<&Candidate<T>> {
        let idx = self.position_of(label, qualify)?;
        Ok(&self.items[idx])
    }
}

impl<T> FromIterator<Candidate<T>> for CandidateSet<T> {
    fn from_iter<I: IntoIterator<Item = Candidate<T>>>(iter: I) -> Self {
        CandidateSet::new(iter)
    }
}

impl<T> IntoIterator for CandidateSet<T> {
    type Item = Candidate<T>;
    type IntoIter = std::vec::IntoIter<Candidate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod tests;
