//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_HOURS: i64 = 24 * 365;

/// Server configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Session token signing secret
    pub jwt_secret: String,
    /// Session lifetime in hours
    pub session_hours: i64,
    /// Tracing filter (e.g. "info", "staff_server=debug")
    pub log_level: String,
    /// Directory for rotating log files; console only when unset
    pub log_dir: Option<String>,
    /// Bootstrap administrator account
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: Option<String>,
    /// Whether public registration may pick the Admin role
    pub allow_admin_registration: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// `SESSION_HOURS`: 24 when unset, otherwise 1..=[`MAX_SESSION_HOURS`]
    fn session_hours(raw: Option<&str>) -> Result<i64, BoxError> {
        let Some(raw) = raw else {
            return Ok(24);
        };
        match raw.trim().parse::<i64>() {
            Ok(hours) if (1..=MAX_SESSION_HOURS).contains(&hours) => Ok(hours),
            _ => Err(format!(
                "SESSION_HOURS must be a whole number between 1 and {MAX_SESSION_HOURS}, got {raw:?}"
            )
            .into()),
        }
    }

    fn flag(name: &str) -> bool {
        std::env::var(name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:staff.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            session_hours: Self::session_hours(std::env::var("SESSION_HOURS").ok().as_deref())?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|s| !s.is_empty()),
            allow_admin_registration: Self::flag("ALLOW_ADMIN_REGISTRATION"),
            environment,
        })
    }

    /// Configuration for tests and local tooling: in-memory database, fixed secret
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "test-secret-with-enough-length-0123456789".into(),
            session_hours: 24,
            log_level: "warn".into(),
            log_dir: None,
            admin_username: "admin".into(),
            admin_email: "admin@example.com".into(),
            admin_password: None,
            allow_admin_registration: false,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
