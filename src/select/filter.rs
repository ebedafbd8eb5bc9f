//! Fallible predicate chain applied before choosing.
use super::error::{SelectError, SelectResult};
use crate::model::{DeployedWorkload, WorkloadType};

/// Predicate over a resolved item; `Ok(false)` drops it, `Err` aborts resolution.
pub type Filter<'f, T> = Box<dyn Fn(&T) -> anyhow::Result<bool> + 'f>;

/// Box a closure as a [`Filter`].
pub fn predicate<'f, T>(f: impl Fn(&T) -> anyhow::Result<bool> + 'f) -> Filter<'f, T> {
    Box::new(f)
}

/// Keep the items every filter accepts, preserving input order.
///
/// The first predicate error is returned verbatim and discards all progress.
pub fn apply_filters<T>(items: Vec<T>, filters: &[Filter<'_, T>]) -> SelectResult<Vec<T>> {
    let mut surviving = items;
    for filter in filters {
        let mut kept = Vec::with_capacity(surviving.len());
        for item in surviving {
            if filter(&item).map_err(SelectError::Filter)? {
                kept.push(item);
            }
        }
        surviving = kept;
    }
    Ok(surviving)
}

/// Admit deployed workloads whose type is in `types`.
///
/// An empty allow-list admits nothing, and workloads with an unknown type
/// never match. Callers wanting "any type" should skip the filter.
pub fn has_type<'f>(types: &'f [WorkloadType]) -> Filter<'f, DeployedWorkload> {
    predicate(move |workload: &DeployedWorkload| {
        Ok(workload
            .workload_type
            .is_some_and(|ty| types.contains(&ty)))
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
