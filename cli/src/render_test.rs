use super::*;
use client::state::overview::{DailyCount, SamplingSplit, UserCounts};
use client::util::nav::{default_nav_items, filter_nav_items};
use client::net::types::Role;
use serde_json::Map;
use time::macros::date;

fn sample_user() -> User {
    let mut claims = Map::new();
    claims.insert("id".into(), json!(7));
    claims.insert("name".into(), json!("Asha"));
    claims.insert("email".into(), json!("asha@example.com"));
    claims.insert("role".into(), json!("admin"));
    User::from_claims(&claims)
}

#[test]
fn signed_in_mentions_role() {
    assert_eq!(signed_in(&sample_user()), "signed in as Asha (admin)");
    assert_eq!(signed_in(&User::placeholder()), "signed in as sofia@devias.io");
}

#[test]
fn user_lists_known_fields() {
    let text = user(&sample_user());
    assert_eq!(text, "id:    7\nname:  Asha\nemail: asha@example.com\nrole:  admin\n");
}

#[test]
fn nav_indents_groups() {
    let items = filter_nav_items(&default_nav_items(), Some(&Role::Admin));
    let text = nav(&items);
    assert!(text.contains("- User Management\n  - Promoter Users (/dashboard/promoter-users)\n"));
    assert!(!text.contains("Admin Users"));
}

#[test]
fn overview_shows_split_and_trend() {
    let overview = Overview {
        users: UserCounts { admins: 1, promoters: 2 },
        feedback: 8,
        taxis: 5,
        registered_today: 3,
        sampling: SamplingSplit { completed: 2, pending: 3, completed_pct: 40, pending_pct: 60 },
        daily_trend: vec![
            DailyCount { date: date!(2026 - 03 - 09), count: 2 },
            DailyCount { date: date!(2026 - 03 - 10), count: 3 },
        ],
    };
    let text = super::overview(&overview);
    assert!(text.contains("sampling:         2 completed (40%), 3 pending (60%)\n"));
    assert!(text.contains("  2026-03-09  2\n  2026-03-10  3\n"));
}

#[test]
fn overview_without_registrations_skips_trend() {
    let overview = Overview {
        users: UserCounts::default(),
        feedback: 0,
        taxis: 0,
        registered_today: 0,
        sampling: SamplingSplit::default(),
        daily_trend: Vec::new(),
    };
    assert!(!super::overview(&overview).contains("daily registrations"));
}

#[test]
fn only_role_keeps_matching_rows() {
    let body = json!({"data": [
        {"id": 1, "role": "admin"},
        {"id": 2, "role": "promoter"},
        {"id": 3, "role": "promoter"},
    ]});
    let narrowed = only_role(&body, "promoter");
    let ids: Vec<i64> = narrowed["data"].as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [2, 3]);
}
