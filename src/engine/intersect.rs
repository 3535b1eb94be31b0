// Mutual follow intersection.

use std::collections::HashSet;

use crate::twitch::{FollowItem, normalize_login};

/// Channels present in both follow lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionResult {
    /// Items of the second list, in its order.
    pub items: Vec<FollowItem>,
    pub total: usize,
}

/// Keep the items of `b` whose login also appears in `a`, preserving `b`'s order.
pub fn intersect(a: &[FollowItem], b: &[FollowItem]) -> IntersectionResult {
    let seen: HashSet<String> = a.iter().map(|item| normalize_login(&item.login)).collect();

    let items: Vec<FollowItem> = b
        .iter()
        .filter(|item| seen.contains(&normalize_login(&item.login)))
        .cloned()
        .collect();

    IntersectionResult {
        total: items.len(),
        items,
    }
}
