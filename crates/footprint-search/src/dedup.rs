//! First-seen deduplication by link.

use std::collections::HashSet;

/// Keep the first item for every distinct non-empty link, in input order.
///
/// Items whose link is empty are dropped outright; they are never treated as
/// duplicates of one another. Runs in O(n) with a seen-set.
pub fn dedup_by_link<T, I, F>(items: I, link: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        let key = link(&item);
        if key.is_empty() || seen.contains(key) {
            continue;
        }
        seen.insert(key.to_string());
        unique.push(item);
    }

    unique
}
