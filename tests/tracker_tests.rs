use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use taskprof::{CallTracker, TrackerConfig};

fn tracker() -> CallTracker {
    CallTracker::new(TrackerConfig {
        capture_stacks: true,
        variations_limit: 2,
    })
}

#[test]
fn test_nested_calls_split_total_and_top_level() {
    let t = tracker();

    t.track("user", None, || {
        t.track("account", None, || ());
    });

    let stats = t.stats();
    let user = &stats["user"];
    assert_eq!(user.total_count, 1);
    assert_eq!(user.top_level_count, 1);

    let account = &stats["account"];
    assert_eq!(account.total_count, 1);
    assert_eq!(account.top_level_count, 0);

    assert_eq!(t.stacks(), vec![vec!["user".to_string(), "account".to_string()]]);
}

#[test]
fn test_total_figures_dominate_top_level_figures() {
    let t = tracker();

    for _ in 0..3 {
        t.track("user", None, || {
            t.track("user", None, || ());
        });
    }

    let stats = t.stats();
    let user = &stats["user"];
    assert_eq!(user.total_count, 6);
    assert_eq!(user.top_level_count, 3);
    assert!(user.total_time >= user.top_level_time);
}

#[test]
fn test_variation_gets_its_own_bucket() {
    let t = tracker();

    t.track("user", Some("admin"), || ());
    t.track("user", Some("admin"), || ());
    t.track("user", None, || ());

    let stats = t.stats();
    let user = &stats["user"];
    assert_eq!(user.total_count, 3);

    let admin = &user.variations["admin"];
    assert_eq!(admin.total_count, 2);
    assert_eq!(admin.top_level_count, 2);
    assert!(user.total_time >= admin.total_time);
}

#[test]
fn test_oversized_variation_key_collapses() {
    let t = tracker();

    t.track("user", Some("[admin,banned,verified]"), || ());
    t.track("user", Some("[one,two,three,four]"), || ());

    let stats = t.stats();
    let user = &stats["user"];
    assert_eq!(user.variations.len(), 1);
    assert_eq!(user.variations["too many variations"].total_count, 2);
}

#[test]
fn test_panicking_body_propagates_with_consistent_counters() {
    let t = tracker();

    let result = catch_unwind(AssertUnwindSafe(|| {
        t.track("boom", None, || panic!("factory exploded"));
    }));
    assert!(result.is_err());

    let stats = t.stats();
    let boom = &stats["boom"];
    assert_eq!(boom.total_count, 1);
    assert_eq!(boom.top_level_count, 1);
    assert!(boom.total_time >= 0.0);

    // Depth unwound: the next call is top-level again and stack capture
    // still works.
    t.track("after", None, || ());
    let stats = t.stats();
    assert_eq!(stats["after"].top_level_count, 1);
    assert_eq!(t.stacks().last().unwrap(), &vec!["after".to_string()]);
}

#[test]
fn test_one_stack_per_top_level_invocation() {
    let t = tracker();

    t.track("post", None, || {
        t.track("account", None, || {
            t.track("user", None, || ());
        });
    });
    t.track("user", None, || ());

    let stacks = t.stacks();
    assert_eq!(stacks.len(), 2);
    assert_eq!(stacks[0], vec!["post", "account", "user"]);
    assert_eq!(stacks[1], vec!["user"]);
}

#[test]
fn test_reset_clears_stats_and_stacks() {
    let t = tracker();

    t.track("user", None, || ());
    t.reset();

    assert!(t.stats().is_empty());
    assert!(t.stacks().is_empty());
}

#[test]
fn test_elapsed_time_accumulates() {
    let t = tracker();

    t.track("sleepy", None, || {
        std::thread::sleep(std::time::Duration::from_millis(5));
    });

    let stats = t.stats();
    assert!(stats["sleepy"].total_time >= 0.005);
    assert_eq!(stats["sleepy"].total_time, stats["sleepy"].top_level_time);
}
