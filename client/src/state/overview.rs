//! Dashboard overview aggregates.
//!
//! DESIGN
//! ======
//! List endpoints answer `{clients: [...]}` or `{data: [...]}` depending on
//! the upstream (and on whether the proxy served a mock), so every reader
//! accepts both. Rows that lack a field are skipped rather than rejected.

#[cfg(test)]
#[path = "overview_test.rs"]
mod overview_test;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::AuthError;
use crate::net::api::ApiClient;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub admins: usize,
    pub promoters: usize,
}

/// Installed vs. pending air-freshener sampling, with whole percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SamplingSplit {
    pub completed: usize,
    pub pending: usize,
    pub completed_pct: u32,
    pub pending_pct: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: Date,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub users: UserCounts,
    pub feedback: usize,
    pub taxis: usize,
    pub registered_today: usize,
    pub sampling: SamplingSplit,
    pub daily_trend: Vec<DailyCount>,
}

/// Rows of a list response.
#[must_use]
pub fn rows(body: &Value) -> &[Value] {
    ["clients", "data"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[must_use]
pub fn user_counts(body: &Value) -> UserCounts {
    rows(body).iter().fold(UserCounts::default(), |mut counts, row| {
        match row.get("role").and_then(Value::as_str) {
            Some("admin") => counts.admins += 1,
            Some("promoter") => counts.promoters += 1,
            _ => {}
        }
        counts
    })
}

#[must_use]
pub fn sampling_split(taxis: &Value) -> SamplingSplit {
    let mut split = SamplingSplit::default();
    for taxi in rows(taxis) {
        match taxi.get("air_freshener_installed").map(flag_text).as_deref() {
            Some("1") => split.completed += 1,
            Some("0") => split.pending += 1,
            _ => {}
        }
    }
    let total = (split.completed + split.pending).max(1);
    split.completed_pct = whole_percent(split.completed, total);
    split.pending_pct = whole_percent(split.pending, total);
    split
}

/// Registrations per calendar day, oldest first; days without any are absent.
#[must_use]
pub fn daily_trend(taxis: &Value) -> Vec<DailyCount> {
    let mut counts: BTreeMap<Date, usize> = BTreeMap::new();
    for date in rows(taxis).iter().filter_map(created_date) {
        *counts.entry(date).or_default() += 1;
    }
    counts.into_iter().map(|(date, count)| DailyCount { date, count }).collect()
}

#[must_use]
pub fn registered_on(taxis: &Value, day: Date) -> usize {
    rows(taxis).iter().filter_map(created_date).filter(|date| *date == day).count()
}

/// Fetch the three list endpoints and aggregate them.
///
/// # Errors
///
/// Propagates the first pipeline error (including session expiry).
pub async fn load_overview(api: &ApiClient, today: Date) -> Result<Overview, AuthError> {
    let users = api.list_users().await?;
    let feedback = api.list_feedback().await?;
    let taxis = api.list_taxis().await?;

    Ok(Overview {
        users: user_counts(&users),
        feedback: rows(&feedback).len(),
        taxis: rows(&taxis).len(),
        registered_today: registered_on(&taxis, today),
        sampling: sampling_split(&taxis),
        daily_trend: daily_trend(&taxis),
    })
}

fn flag_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn whole_percent(part: usize, total: usize) -> u32 {
    ((part * 200 + total) / (total * 2)) as u32
}

/// `created_at` as a calendar date: RFC 3339 (UTC date), or any string whose
/// first ten characters are `YYYY-MM-DD`.
fn created_date(row: &Value) -> Option<Date> {
    let raw = row.get("created_at")?.as_str()?.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at.to_offset(time::UtcOffset::UTC).date());
    }
    let day = raw.get(..10)?;
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}
