//! Connection configuration.

use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};

/// Connection settings for a MySQL server.
///
/// Mapped onto [`MySqlConnectOptions`]; no DSN string is ever
/// assembled.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Account name.
    pub username: String,
    /// Account password, if the account has one.
    pub password: Option<String>,
    /// Server hostname or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database (schema) to use.
    pub database: String,
    /// Connection collation, e.g. `utf8mb4_general_ci`.
    pub collation: Option<String>,
    /// Require TLS for the connection.
    pub tls: bool,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            username: String::from("root"),
            password: None,
            host: String::from("127.0.0.1"),
            port: 3306,
            database: String::new(),
            collation: None,
            tls: false,
        }
    }
}

impl ConnectConfig {
    pub(crate) fn options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.database);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(collation) = &self.collation {
            options = options.collation(collation);
        }
        if self.tls {
            options = options.ssl_mode(MySqlSslMode::Required);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_server() {
        let config = ConnectConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3306);
        assert_eq!(config.username, "root");
        assert!(config.password.is_none());
        assert!(!config.tls);
    }

    #[test]
    fn test_options_builds_without_panicking() {
        let config = ConnectConfig {
            password: Some(String::from("123456")),
            database: String::from("test1"),
            collation: Some(String::from("utf8mb4_general_ci")),
            tls: true,
            ..ConnectConfig::default()
        };
        let _ = config.options();
    }
}
