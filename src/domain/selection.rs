//! The retention sweep decision core.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::id::{Did, RecordUri};
use super::plan::DeletionPlan;
use super::policy::RetentionPolicy;
use super::record::{Like, Post};

/// Compute the records to delete and the likes to remove.
///
/// A like of one of the account's own posts is the preservation mark: the
/// target post is retained unconditionally and the like itself is never
/// removed, since removing it would un-mark the post. A post linking to a
/// protected domain is likewise retained against staleness and virality.
/// Everything else is deleted when it is stale or viral; likes are judged
/// only by their own age.
///
/// Output order follows input iteration order, so the same snapshot always
/// yields the same plan.
pub fn build_plan(
    policy: &RetentionPolicy,
    owner: &Did,
    likes: &[Like],
    posts: &[Post],
    now: DateTime<Utc>,
) -> DeletionPlan {
    // Preservation marks are recomputed from the current like set on every
    // run; liking or un-liking between runs changes the outcome.
    let self_liked: HashSet<&RecordUri> = likes
        .iter()
        .filter(|like| like.target.authority() == Some(owner.as_str()))
        .map(|like| &like.target)
        .collect();

    let mut plan = DeletionPlan::default();
    let mut scheduled: HashSet<&RecordUri> = HashSet::new();

    for post in posts {
        if self_liked.contains(&post.uri) {
            continue;
        }
        if policy.touches_protected_domain(post.domains.iter().map(String::as_str)) {
            continue;
        }
        if (policy.is_stale(post.created_at, now) || policy.is_viral(post.repost_count))
            && scheduled.insert(&post.uri)
        {
            plan.posts_to_delete.push(post.uri.clone());
        }
    }

    for like in likes {
        if self_liked.contains(&like.target) {
            continue;
        }
        if policy.is_stale(like.created_at, now) && scheduled.insert(&like.uri) {
            plan.likes_to_remove.push(like.uri.clone());
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{day, like, other_post_uri, post, post_uri, post_with_domains, OWNER_DID};

    fn owner() -> Did {
        Did::new(OWNER_DID)
    }

    fn policy(max_reposts: u32, stale_limit_days: u32) -> RetentionPolicy {
        RetentionPolicy::try_new(max_reposts, stale_limit_days, Vec::new()).unwrap()
    }

    fn protecting(domains: &[&str]) -> RetentionPolicy {
        RetentionPolicy::try_new(100, 2, domains.iter().map(|d| d.to_string())).unwrap()
    }

    #[test]
    fn stale_or_viral_posts_are_deleted() {
        // Policy {max_reposts: 100, stale_limit: 2}, now = day 100.
        let policy = policy(100, 2);
        let now = day(100);
        let posts = vec![
            // A: age 3 >= 2, staleness triggers despite modest reposts.
            post("a", day(97), 5),
            // B: age 1 < 2 but 150 > 100 reposts, virality triggers.
            post("b", day(99), 150),
            // D: age 1, 5 reposts, neither rule triggers.
            post("d", day(99), 5),
        ];

        let plan = build_plan(&policy, &owner(), &[], &posts, now);
        assert_eq!(plan.posts_to_delete, vec![post_uri("a"), post_uri("b")]);
        assert!(plan.likes_to_remove.is_empty());
    }

    #[test]
    fn self_liked_posts_survive_every_rule() {
        let policy = policy(100, 2);
        let now = day(100);
        // C: stale AND viral, but self-liked.
        let posts = vec![post("c", day(50), 5000)];
        let likes = vec![like("mark", post_uri("c"), day(50))];

        let plan = build_plan(&policy, &owner(), &likes, &posts, now);
        assert!(plan.posts_to_delete.is_empty());
        // The preserving like is itself stale, yet must never be removed.
        assert!(plan.likes_to_remove.is_empty());
    }

    #[test]
    fn protected_domain_posts_survive_staleness_and_virality() {
        let policy = protecting(&["example.com"]);
        let now = day(100);
        let posts = vec![
            post_with_domains("keep", day(10), 9999, &["example.com"]),
            post_with_domains("keep-case", day(10), 9999, &["EXAMPLE.COM"]),
            post_with_domains("sweep", day(10), 9999, &["other.net"]),
        ];

        let plan = build_plan(&policy, &owner(), &[], &posts, now);
        assert_eq!(plan.posts_to_delete, vec![post_uri("sweep")]);
    }

    #[test]
    fn repost_count_boundary_is_strict() {
        let policy = policy(100, 0);
        let now = day(100);
        let posts = vec![post("at-limit", day(99), 100), post("over", day(99), 101)];

        let plan = build_plan(&policy, &owner(), &[], &posts, now);
        assert_eq!(plan.posts_to_delete, vec![post_uri("over")]);
    }

    #[test]
    fn age_boundary_is_inclusive() {
        let policy = policy(0, 2);
        let now = day(100);
        let posts = vec![post("fresh", day(99), 0), post("at-limit", day(98), 0)];

        let plan = build_plan(&policy, &owner(), &[], &posts, now);
        assert_eq!(plan.posts_to_delete, vec![post_uri("at-limit")]);
    }

    #[test]
    fn stale_likes_of_other_posts_are_removed() {
        let policy = policy(0, 2);
        let now = day(100);
        let likes = vec![
            // L: 50 days old, targets someone else's post.
            like("l", other_post_uri("x"), day(50)),
            // Fresh like, same target kind.
            like("fresh", other_post_uri("y"), day(99)),
        ];

        let plan = build_plan(&policy, &owner(), &likes, &[], now);
        assert_eq!(plan.likes_to_remove, vec![crate::testkit::like_uri("l")]);
    }

    #[test]
    fn self_like_is_never_removed_and_its_target_is_retained() {
        let policy = policy(0, 2);
        let now = day(100);
        let posts = vec![post("kept", day(10), 0)];
        let likes = vec![
            like("m", post_uri("kept"), day(50)),
            like("l", other_post_uri("x"), day(50)),
        ];

        let plan = build_plan(&policy, &owner(), &likes, &posts, now);
        assert!(plan.posts_to_delete.is_empty());
        assert_eq!(plan.likes_to_remove, vec![crate::testkit::like_uri("l")]);
    }

    #[test]
    fn likes_ignore_virality_and_domain_protection() {
        // Only the stale limit applies to likes; a like has no repost count
        // or domains of its own.
        let policy = protecting(&["example.com"]);
        let now = day(100);
        let likes = vec![like("old", other_post_uri("x"), day(10))];

        let plan = build_plan(&policy, &owner(), &likes, &[], now);
        assert_eq!(plan.likes_to_remove.len(), 1);
    }

    #[test]
    fn duplicate_input_records_are_scheduled_once() {
        let policy = policy(0, 2);
        let now = day(100);
        let posts = vec![post("dup", day(10), 0), post("dup", day(10), 0)];
        let likes = vec![
            like("same", other_post_uri("x"), day(10)),
            like("same", other_post_uri("x"), day(10)),
        ];

        let plan = build_plan(&policy, &owner(), &likes, &posts, now);
        assert_eq!(plan.posts_to_delete.len(), 1);
        assert_eq!(plan.likes_to_remove.len(), 1);
    }

    #[test]
    fn identical_inputs_yield_identical_plans() {
        let policy = policy(100, 2);
        let now = day(100);
        let posts = vec![
            post("a", day(97), 5),
            post("b", day(99), 150),
            post_with_domains("c", day(10), 0, &["example.org"]),
        ];
        let likes = vec![
            like("l1", other_post_uri("x"), day(50)),
            like("l2", post_uri("c"), day(60)),
        ];

        let first = build_plan(&policy, &owner(), &likes, &posts, now);
        let second = build_plan(&policy, &owner(), &likes, &posts, now);
        assert_eq!(first, second);
    }

    #[test]
    fn output_preserves_input_order() {
        let policy = policy(0, 2);
        let now = day(100);
        let posts = vec![post("z", day(10), 0), post("a", day(10), 0), post("m", day(10), 0)];

        let plan = build_plan(&policy, &owner(), &[], &posts, now);
        assert_eq!(
            plan.posts_to_delete,
            vec![post_uri("z"), post_uri("a"), post_uri("m")]
        );
    }
}
