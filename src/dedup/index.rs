//! Membership index over previously cached tweet ids.

use crate::tweet::Tweet;

/// Ordered-search index over a prior result set.
///
/// The prior list must be sorted by strictly decreasing id. The cache loader
/// enforces this before an index is built; the index itself does not
/// re-check it.
#[derive(Debug, Clone, Default)]
pub struct DedupIndex {
    ids: Vec<u64>,
}

impl DedupIndex {
    /// Build the index from a prior cache list.
    pub fn new(prior: &[Tweet]) -> Self {
        Self {
            ids: prior.iter().map(|t| t.id).collect(),
        }
    }

    /// Binary search with descending keys: larger ids precede smaller ones.
    ///
    /// `Ok(index)` when found, otherwise `Err(insertion_point)`.
    pub fn search(&self, id: u64) -> Result<usize, usize> {
        self.ids.binary_search_by(|probe| id.cmp(probe))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.search(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tweets from `fetched` whose id is not in the index, in input order.
    pub fn new_tweets<'a>(&self, fetched: &'a [Tweet]) -> Vec<&'a Tweet> {
        fetched.iter().filter(|t| !self.contains(t.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tweet::Author;

    fn tweet(id: u64) -> Tweet {
        Tweet {
            id,
            text: String::new(),
            hashtags: Vec::new(),
            media: Vec::new(),
            author: Author::default(),
            language: String::new(),
        }
    }

    fn index(ids: &[u64]) -> DedupIndex {
        let prior: Vec<Tweet> = ids.iter().copied().map(tweet).collect();
        DedupIndex::new(&prior)
    }

    #[test]
    fn test_empty_index_reports_absent() {
        let idx = index(&[]);
        assert!(idx.is_empty());
        assert!(!idx.contains(0));
        assert!(!idx.contains(u64::MAX));
        assert_eq!(idx.search(5), Err(0));
    }

    #[test]
    fn test_single_element() {
        let idx = index(&[100]);
        assert_eq!(idx.search(100), Ok(0));
        assert_eq!(idx.search(105), Err(0));
        assert_eq!(idx.search(95), Err(1));
    }

    #[test]
    fn test_insertion_points_at_edges() {
        let idx = index(&[50, 40, 30, 20, 10]);
        assert_eq!(idx.search(60), Err(0));
        assert_eq!(idx.search(5), Err(5));
        assert_eq!(idx.search(35), Err(2));
    }

    #[test]
    fn test_contains_matches_linear_scan() {
        let ids: Vec<u64> = (0..40u64).rev().map(|i| i * 3 + 1).collect();
        let idx = index(&ids);

        for probe in 0..130u64 {
            assert_eq!(
                idx.contains(probe),
                ids.contains(&probe),
                "mismatch for id {}",
                probe
            );
        }
    }

    #[test]
    fn test_new_tweets_excludes_prior() {
        let idx = index(&[100]);
        let fetched = vec![tweet(105), tweet(100)];
        let fresh: Vec<u64> = idx.new_tweets(&fetched).iter().map(|t| t.id).collect();
        assert_eq!(fresh, vec![105]);
    }
}
