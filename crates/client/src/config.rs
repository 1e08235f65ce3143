//! Client configuration constants

/// Fixed knobs shared by the session store and the request pipeline
pub struct ClientConfig;

impl ClientConfig {
    /// Storage key for the short-lived bearer credential
    pub const ACCESS_TOKEN_KEY: &'static str = "accessToken";

    /// Storage key for the long-lived refresh credential
    pub const REFRESH_TOKEN_KEY: &'static str = "refreshToken";

    /// Storage key for the JSON-serialized user profile
    pub const USER_KEY: &'static str = "user";

    /// Default outbound request timeout on native targets
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Route the browser is sent to when the session cannot be recovered
    pub const LOGIN_ROUTE: &'static str = "/login";

    /// Lifetime of credential cookies written by the cookie backend
    pub const COOKIE_MAX_AGE_SECS: u64 = 86_400;
}
