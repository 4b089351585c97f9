//! Merging and ordering of tweet lists.

use crate::tweet::Tweet;

/// True when ids are strictly decreasing (sorted and unique).
pub fn is_strictly_descending(tweets: &[Tweet]) -> bool {
    tweets.windows(2).all(|pair| pair[0].id > pair[1].id)
}

/// Sort by decreasing id and drop repeated ids, keeping the first occurrence.
pub fn sort_descending_unique(mut tweets: Vec<Tweet>) -> Vec<Tweet> {
    // Stable sort so "first occurrence" refers to input order.
    tweets.sort_by(|a, b| b.id.cmp(&a.id));
    tweets.dedup_by_key(|t| t.id);
    tweets
}

/// Union of `prior` and `fetched`, sorted by decreasing id with unique ids.
///
/// On an id collision the prior record wins.
pub fn merge(prior: &[Tweet], fetched: &[Tweet]) -> Vec<Tweet> {
    let combined: Vec<Tweet> = prior.iter().chain(fetched.iter()).cloned().collect();
    sort_descending_unique(combined)
}
