use super::*;
use crate::test_helpers::harness;
use serde_json::json;
use time::macros::date;

#[test]
fn rows_reads_clients_then_data() {
    assert_eq!(rows(&json!({"clients": [1, 2]})).len(), 2);
    assert_eq!(rows(&json!({"data": [1, 2, 3]})).len(), 3);
    assert!(rows(&json!({"message": "none"})).is_empty());
    assert!(rows(&Value::Null).is_empty());
}

#[test]
fn user_counts_by_role() {
    let body = json!({"data": [
        {"role": "admin"}, {"role": "promoter"}, {"role": "promoter"}, {"role": "superadmin"}, {}
    ]});
    assert_eq!(user_counts(&body), UserCounts { admins: 1, promoters: 2 });
}

#[test]
fn sampling_split_accepts_string_and_number_flags() {
    let body = json!({"clients": [
        {"air_freshener_installed": "1"},
        {"air_freshener_installed": 1},
        {"air_freshener_installed": "0"},
        {"air_freshener_installed": null},
    ]});
    let split = sampling_split(&body);
    assert_eq!((split.completed, split.pending), (2, 1));
    assert_eq!((split.completed_pct, split.pending_pct), (67, 33));
}

#[test]
fn sampling_split_of_empty_list_is_zero() {
    assert_eq!(sampling_split(&json!({"clients": []})), SamplingSplit::default());
}

#[test]
fn daily_trend_groups_and_sorts_by_date() {
    let body = json!({"clients": [
        {"created_at": "2025-03-02T10:00:00.000Z"},
        {"created_at": "2025-02-28 09:30:00"},
        {"created_at": "2025-03-02T23:59:59Z"},
        {"created_at": "not a date"},
        {"created_at": ""},
        {}
    ]});
    assert_eq!(
        daily_trend(&body),
        vec![
            DailyCount { date: date!(2025 - 02 - 28), count: 1 },
            DailyCount { date: date!(2025 - 03 - 02), count: 2 },
        ]
    );
}

#[test]
fn overview_serializes_dates_as_calendar_days() {
    let overview = Overview {
        users: UserCounts { admins: 1, promoters: 2 },
        feedback: 8,
        taxis: 1,
        registered_today: 1,
        sampling: SamplingSplit { completed: 1, pending: 0, completed_pct: 100, pending_pct: 0 },
        daily_trend: vec![DailyCount { date: date!(2026 - 10 - 19), count: 1 }],
    };
    let value = serde_json::to_value(&overview).unwrap();
    assert_eq!(
        value,
        json!({
            "users": {"admins": 1, "promoters": 2},
            "feedback": 8,
            "taxis": 1,
            "registered_today": 1,
            "sampling": {"completed": 1, "pending": 0, "completed_pct": 100, "pending_pct": 0},
            "daily_trend": [{"date": "2026-10-19", "count": 1}],
        })
    );
}

#[test]
fn registered_on_counts_matching_day() {
    let body = json!({"clients": [
        {"created_at": "2025-03-02T10:00:00Z"},
        {"created_at": "2025-03-01T10:00:00Z"},
    ]});
    assert_eq!(registered_on(&body, date!(2025 - 03 - 02)), 1);
    assert_eq!(registered_on(&body, date!(2025 - 03 - 03)), 0);
}

#[tokio::test]
async fn load_overview_aggregates_all_lists() {
    let h = harness(crate::paths::dashboard::OVERVIEW);
    h.transport.respond(200, json!({"data": [{"role": "admin"}, {"role": "promoter"}]}));
    h.transport.respond(200, json!({"message": "Feedbacks retrieved", "clients": [{}, {}, {}]}));
    h.transport.respond(200, json!({"clients": [
        {"created_at": "2025-03-02T10:00:00Z", "air_freshener_installed": "1"},
        {"created_at": "2025-03-01T10:00:00Z", "air_freshener_installed": "0"},
    ]}));

    let overview = load_overview(&h.api, date!(2025 - 03 - 02)).await.unwrap();
    assert_eq!(overview.users, UserCounts { admins: 1, promoters: 1 });
    assert_eq!(overview.feedback, 3);
    assert_eq!(overview.taxis, 2);
    assert_eq!(overview.registered_today, 1);
    assert_eq!(overview.sampling.completed_pct, 50);
    assert_eq!(overview.daily_trend.len(), 2);
}

#[tokio::test]
async fn load_overview_stops_on_session_expiry() {
    let h = harness(crate::paths::dashboard::OVERVIEW);
    h.transport.respond(401, json!({}));
    let err = load_overview(&h.api, date!(2025 - 03 - 02)).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired { status: 401, .. }));
    assert_eq!(h.transport.requests().len(), 1);
}
