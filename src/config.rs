use anyhow::Context;

/// Upper bound for session lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://database.db?mode=rwc".into());
        let jwt = JwtConfig {
            secret: var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "tutorlink".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "tutorlink-users".into()),
            ttl_minutes: clamp_ttl_minutes(
                var("JWT_TTL_MINUTES")
                    .and_then(|v| v.trim().parse::<i64>().ok())
                    .unwrap_or(60 * 24),
            ),
            cookie_secure: var("COOKIE_SECURE").map(|v| parse_flag(&v)).unwrap_or(true),
        };
        let port = var("APP_PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        Ok(Self {
            database_url,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            jwt,
        })
    }
}

pub fn clamp_ttl_minutes(minutes: i64) -> i64 {
    minutes.clamp(1, MAX_TTL_MINUTES)
}

fn parse_flag(v: &str) -> bool {
    !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
