#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Sqlite URL for the requests store. Required; absence is reported on
    /// first store access, not at startup.
    pub database_url: Option<String>,
    /// Shared secret for admin routes. Admin routes fail with a
    /// configuration error while this is unset.
    pub admin_key: Option<String>,
    /// When true, internal error detail is never echoed to callers.
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(39080),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            admin_key: std::env::var("ADMIN_KEY").ok().filter(|v| !v.is_empty()),
            production: std::env::var("REQUESTBOX_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }
}
