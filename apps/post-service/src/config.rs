//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::IdentityConfig;
use blog_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub identity: Option<IdentityConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = database_url(
            env::var("DATABASE_URL").ok(),
            PostgresParts::from_env(),
        )
        .map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 10),
            connect_timeout: Duration::from_secs(parse_or("DB_CONNECT_TIMEOUT_SECS", 8)),
            run_migrations: parse_or("DB_RUN_MIGRATIONS", false),
        });

        let identity = identity_url(
            env::var("IDENTITY_SERVICE_URL").ok(),
            env::var("USER_SERVICE_HOST").ok(),
            env::var("USER_SERVICE_PORT").ok(),
        )
        .map(|base_url| IdentityConfig {
            base_url,
            timeout: Duration::from_secs(parse_or("IDENTITY_TIMEOUT_SECS", 5)),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            identity,
        }
    }
}

/// Discrete postgres settings, used when no `DATABASE_URL` is given.
#[derive(Debug, Default)]
struct PostgresParts {
    host: Option<String>,
    port: Option<String>,
    user: Option<String>,
    password: Option<String>,
    database: Option<String>,
}

impl PostgresParts {
    fn from_env() -> Self {
        Self {
            host: env::var("POSTGRES_HOST").ok(),
            port: env::var("POSTGRES_PORT").ok(),
            user: env::var("POSTGRES_USER").ok(),
            password: env::var("POSTGRES_PASSWORD").ok(),
            database: env::var("POSTGRES_DATABASE").ok(),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// An explicit URL wins; otherwise host and database name are required.
fn database_url(url: Option<String>, parts: PostgresParts) -> Option<String> {
    if let Some(url) = non_blank(url) {
        return Some(url);
    }

    let host = non_blank(parts.host)?;
    let database = non_blank(parts.database)?;
    let url = DatabaseConfig::postgres_url(
        &host,
        &non_blank(parts.port).unwrap_or_else(|| "5432".to_string()),
        &non_blank(parts.user).unwrap_or_else(|| "postgres".to_string()),
        &parts.password.unwrap_or_default(),
        &database,
    );
    if url.is_none() {
        tracing::warn!(host = %host, "POSTGRES_HOST/POSTGRES_PORT do not form a valid address");
    }
    url
}

fn identity_url(url: Option<String>, host: Option<String>, port: Option<String>) -> Option<String> {
    if let Some(url) = non_blank(url) {
        return Some(url);
    }

    let host = non_blank(host)?;
    Some(match non_blank(port) {
        Some(port) => format!("http://{}:{}", host, port),
        None => format!("http://{}", host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_database_url_wins() {
        let parts = PostgresParts {
            host: Some("db".into()),
            database: Some("blog".into()),
            ..Default::default()
        };
        let url = database_url(Some("postgres://a@b:1/c".into()), parts);
        assert_eq!(url.as_deref(), Some("postgres://a@b:1/c"));
    }

    #[test]
    fn database_url_assembled_from_parts() {
        let parts = PostgresParts {
            host: Some("db".into()),
            port: Some("6543".into()),
            user: Some("blog".into()),
            password: Some("secret".into()),
            database: Some("posts".into()),
        };
        assert_eq!(
            database_url(None, parts).as_deref(),
            Some("postgres://blog:secret@db:6543/posts")
        );
    }

    #[test]
    fn assembled_password_is_encoded() {
        let parts = PostgresParts {
            host: Some("db".into()),
            password: Some("p@ss/w#rd".into()),
            database: Some("posts".into()),
            ..Default::default()
        };
        assert_eq!(
            database_url(None, parts).as_deref(),
            Some("postgres://postgres:p%40ss%2Fw%23rd@db:5432/posts")
        );
    }

    #[test]
    fn no_database_without_host() {
        let parts = PostgresParts {
            database: Some("posts".into()),
            ..Default::default()
        };
        assert_eq!(database_url(Some("  ".into()), parts), None);
    }

    #[test]
    fn identity_url_from_host_and_port() {
        assert_eq!(
            identity_url(None, Some("users".into()), Some("9000".into())).as_deref(),
            Some("http://users:9000")
        );
        assert_eq!(identity_url(None, None, Some("9000".into())), None);
    }
}
