//! Plain-text rendering for terminal output.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use client::net::types::User;
use client::state::overview::{Overview, rows};
use client::util::nav::NavItem;
use serde_json::{Value, json};

pub fn signed_in(user: &User) -> String {
    match user.role.as_deref() {
        Some(role) => format!("signed in as {} ({role})", user.display_name()),
        None => format!("signed in as {}", user.display_name()),
    }
}

pub fn user(user: &User) -> String {
    let mut out = format!("id:    {}\n", user.id);
    for (label, value) in [("name", &user.name), ("email", &user.email), ("role", &user.role)] {
        if let Some(value) = value {
            let _ = writeln!(out, "{:<6} {value}", format!("{label}:"));
        }
    }
    out
}

pub fn nav(items: &[NavItem]) -> String {
    let mut out = String::new();
    write_nav(&mut out, items, 0);
    out
}

fn write_nav(out: &mut String, items: &[NavItem], depth: usize) {
    for item in items {
        let indent = "  ".repeat(depth);
        match &item.href {
            Some(href) => {
                let _ = writeln!(out, "{indent}- {} ({href})", item.title);
            }
            None => {
                let _ = writeln!(out, "{indent}- {}", item.title);
            }
        }
        write_nav(out, &item.items, depth + 1);
    }
}

pub fn overview(overview: &Overview) -> String {
    let sampling = &overview.sampling;
    let mut out = String::new();
    let _ = writeln!(out, "admins:           {}", overview.users.admins);
    let _ = writeln!(out, "promoters:        {}", overview.users.promoters);
    let _ = writeln!(out, "feedback:         {}", overview.feedback);
    let _ = writeln!(out, "taxis:            {}", overview.taxis);
    let _ = writeln!(out, "registered today: {}", overview.registered_today);
    let _ = writeln!(
        out,
        "sampling:         {} completed ({}%), {} pending ({}%)",
        sampling.completed, sampling.completed_pct, sampling.pending, sampling.pending_pct
    );
    if !overview.daily_trend.is_empty() {
        let _ = writeln!(out, "daily registrations:");
        for day in &overview.daily_trend {
            let _ = writeln!(out, "  {}  {}", day.date, day.count);
        }
    }
    out
}

/// List body narrowed to rows whose `role` equals `role`.
pub fn only_role(body: &Value, role: &str) -> Value {
    let kept: Vec<Value> = rows(body)
        .iter()
        .filter(|row| row.get("role").and_then(Value::as_str) == Some(role))
        .cloned()
        .collect();
    json!({ "data": kept })
}
