//! Free-text station name resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::StationId;

use super::directory::StationDirectory;
use super::score::weighted_ratio;

/// Default minimum score for a match, on the 0–100 scale.
pub const DEFAULT_MIN_SCORE: f64 = 80.0;

/// How many ranked candidates to consider before giving up.
const CANDIDATE_LIMIT: usize = 10;

/// A successful name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStation {
    /// Canonical display name from the directory.
    pub name: String,
    /// NaPTAN code.
    pub id: StationId,
}

/// Fuzzy-matches free-text station names against the directory.
///
/// "No match" is a valid outcome, not an error; callers substitute the
/// neutral crowding weight. Results are memoized unboundedly for process
/// lifetime: the directory is static per run, so the key space is fixed
/// and small.
pub struct StationResolver {
    directory: Arc<StationDirectory>,
    min_score: f64,
    memo: Mutex<HashMap<String, Option<ResolvedStation>>>,
}

impl StationResolver {
    /// Create a resolver over the given directory with the default
    /// threshold.
    pub fn new(directory: Arc<StationDirectory>) -> Self {
        Self {
            directory,
            min_score: DEFAULT_MIN_SCORE,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Set a custom minimum score.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// The directory this resolver matches against.
    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    /// Resolve a free-text name to a canonical station.
    ///
    /// Candidates are ranked by score; the best-scoring candidate that
    /// clears the threshold AND carries the Tube prefix wins. Checking
    /// beyond the single best candidate matters because non-station stop
    /// points can outscore the station they belong to.
    pub fn resolve(&self, text: &str) -> Option<ResolvedStation> {
        if let Some(cached) = self.memo_get(text) {
            return cached;
        }

        let result = self.resolve_uncached(text);
        self.memo_put(text, result.clone());
        result
    }

    fn resolve_uncached(&self, text: &str) -> Option<ResolvedStation> {
        let mut scored: Vec<(f64, &super::directory::StationRecord)> = self
            .directory
            .records()
            .iter()
            .map(|record| (weighted_ratio(text, &record.name), record))
            .collect();

        // Rank descending; ties broken by name for deterministic output.
        scored.sort_by(|(sa, ra), (sb, rb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ra.name.cmp(&rb.name))
        });

        scored
            .into_iter()
            .take(CANDIDATE_LIMIT)
            .find(|(score, record)| *score >= self.min_score && record.id.is_tube())
            .map(|(_, record)| ResolvedStation {
                name: record.name.clone(),
                id: record.id.clone(),
            })
    }

    fn memo_get(&self, text: &str) -> Option<Option<ResolvedStation>> {
        let memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        memo.get(text).cloned()
    }

    fn memo_put(&self, text: &str, result: Option<ResolvedStation>) {
        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        memo.insert(text.to_string(), result);
    }

    #[cfg(test)]
    fn memo_len(&self) -> usize {
        self.memo.lock().unwrap().len()
    }
}
