//! Stand-in datasets returned when the backend is unavailable.
//!
//! Timestamps are generated at response time so "today" aggregates stay
//! populated.

#[cfg(test)]
#[path = "mock_test.rs"]
mod mock_test;

use serde_json::{Value, json};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

fn timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_default()
}

/// Five taxis: three created `now`, one a day earlier, one two days earlier.
#[must_use]
pub fn mock_taxis(now: OffsetDateTime) -> Value {
    let today = timestamp(now);
    let yesterday = timestamp(now - Duration::days(1));
    let two_days_ago = timestamp(now - Duration::days(2));
    json!({
        "clients": [
            { "id": 1, "name": "Taxi-001", "mobile": "9876543210", "created_at": today },
            { "id": 2, "name": "Taxi-002", "mobile": "9876543211", "created_at": today },
            { "id": 3, "name": "Taxi-003", "mobile": "9876543212", "created_at": today },
            { "id": 4, "name": "Taxi-004", "mobile": "9876543213", "created_at": yesterday },
            { "id": 5, "name": "Taxi-005", "mobile": "9876543214", "created_at": two_days_ago },
        ]
    })
}

const FEEDBACK_ROWS: [(&str, &str, &str, &str, &str, &str, &str, &str); 8] = [
    ("MH12AB1234", "Ramesh Patil", "Rose", "ramesh@gmail.com", "1", "1", "1", "Great service"),
    ("MH12AB1235", "Amit Singh", "Jasmine", "amit@gmail.com", "1", "1", "1", "Good experience"),
    ("MH12AB1236", "Vikram Rao", "Lavender", "vikram@gmail.com", "1", "1", "1", "Excellent"),
    ("MH12AB1237", "Harish Kumar", "Sandalwood", "harish@gmail.com", "1", "0", "1", "Nice fragrance"),
    ("MH12AB1238", "Sagar Patil", "Rose", "sagar@gmail.com", "1", "1", "1", "Very good"),
    ("MH12AB1239", "Rahul Singh", "Jasmine", "rahul@gmail.com", "0", "1", "0", "Average"),
    ("MH12AB1240", "Priya Sharma", "Lavender", "priya@gmail.com", "1", "1", "1", "Perfect"),
    ("MH12AB1241", "Deepak Verma", "Sandalwood", "deepak@gmail.com", "1", "1", "1", "Wonderful fragrance"),
];

/// Eight feedback rows under `clients`.
#[must_use]
pub fn mock_feedback(now: OffsetDateTime) -> Value {
    let created_at = timestamp(now);
    let clients: Vec<Value> = FEEDBACK_ROWS
        .iter()
        .zip(1..)
        .map(|(&(taxi, driver, fragrance, promoter, liked, passenger, again, comments), id)| {
            json!({
                "id": id,
                "taxi_number": taxi,
                "driver_name": driver,
                "fragrance": fragrance,
                "promotor_id": promoter,
                "is_liked": liked,
                "has_passenger_liked": passenger,
                "will_use_again": again,
                "comments": comments,
                "created_at": created_at,
            })
        })
        .collect();
    json!({ "message": "Feedbacks retrieved", "clients": clients })
}

/// One admin and two promoters under `data`.
#[must_use]
pub fn mock_users(now: OffsetDateTime) -> Value {
    let created_at = timestamp(now);
    json!({
        "data": [
            { "id": 1, "name": "Admin User", "email": "admin@example.com", "mobile": "9876543210", "role": "admin", "created_at": created_at, "created_by": "System" },
            { "id": 2, "name": "Promoter User 1", "email": "promoter1@example.com", "mobile": "9876543211", "role": "promoter", "created_at": created_at, "created_by": "System" },
            { "id": 3, "name": "Promoter User 2", "email": "promoter2@example.com", "mobile": "9876543212", "role": "promoter", "created_at": created_at, "created_by": "System" },
        ]
    })
}
