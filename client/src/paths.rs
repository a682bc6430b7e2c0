//! Fixed route strings shared by guards, the request pipeline and navigation.

pub const HOME: &str = "/";

pub mod auth {
    pub const SIGN_IN: &str = "/auth/sign-in";
    pub const SIGN_UP: &str = "/auth/sign-up";
    pub const RESET_PASSWORD: &str = "/auth/reset-password";
}

pub mod dashboard {
    pub const OVERVIEW: &str = "/dashboard/overview";
    pub const ACCOUNT: &str = "/dashboard/account";
    pub const TAXIS: &str = "/dashboard/taxis";
    pub const FEEDBACK: &str = "/dashboard/feedback";
    pub const USER: &str = "/dashboard/user";
    pub const VEHICLE_SEARCH: &str = "/dashboard/vehicle-search";
    pub const ADMIN_USERS: &str = "/dashboard/admin-users";
    pub const PROMOTER_USERS: &str = "/dashboard/promoter-users";
    pub const EMPLOYEE: &str = "/dashboard/employee";
}

/// Whether `path` already points at the sign-in screen (query strings and
/// nested segments included).
#[must_use]
pub fn is_sign_in(path: &str) -> bool {
    path.strip_prefix(auth::SIGN_IN)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}
