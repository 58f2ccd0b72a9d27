use crate::voting::{CandidateTally, Category};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("expected {expected} candidates to label, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Labels each candidate with at most one category so that no category is used twice.
///
/// Categories are processed in the order given. Each one claims the unassigned
/// candidate with the most votes for it; on a tie the earliest candidate in
/// `candidates` wins. A completion pass then hands any still-unlabelled
/// candidate the first category nobody holds, without looking at votes.
///
/// `result[i]` is the label for `candidates[i]`. It is only `None` when there
/// are more candidates than categories.
pub fn assign_unique_categories<T, C, F>(
    candidates: &[T],
    categories: &[C],
    votes: F,
) -> Vec<Option<C>>
where
    C: Copy + PartialEq,
    F: Fn(&T, C) -> u32,
{
    let mut assignments: Vec<Option<C>> = vec![None; candidates.len()];

    for &category in categories {
        let mut best: Option<(usize, u32)> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            if assignments[index].is_some() {
                continue;
            }
            let count = votes(candidate, category);
            // Strict comparison: a later equal count never displaces an earlier one
            if best.map_or(true, |(_, max)| count > max) {
                best = Some((index, count));
            }
        }

        if let Some((index, _)) = best {
            assignments[index] = Some(category);
        }
    }

    for index in 0..assignments.len() {
        if assignments[index].is_some() {
            continue;
        }
        let unused = categories
            .iter()
            .copied()
            .find(|category| !assignments.contains(&Some(*category)));
        assignments[index] = unused;
    }

    assignments
}

/// Strict entry used for display: exactly one Marry/Fuck/Kill label per tally.
pub fn resolve_categories(tallies: &[CandidateTally]) -> Result<Vec<Category>, ResolveError> {
    let mismatch = ResolveError::SizeMismatch {
        expected: Category::ALL.len(),
        actual: tallies.len(),
    };
    if tallies.len() != Category::ALL.len() {
        return Err(mismatch);
    }

    assign_unique_categories(tallies, &Category::ALL, |tally, category| tally.votes(category))
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(mismatch)
}
