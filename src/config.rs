//! Environment configuration for the Salesforce connection.

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub login_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub const DEFAULT_LOGIN_URL: &'static str = "https://login.salesforce.com";

    /// Read the SALESFORCE_* variables. Missing credentials are not an error
    /// here; they surface at request time.
    pub fn from_env() -> Self {
        Self {
            login_url: std::env::var("SALESFORCE_LOGIN_URL")
                .unwrap_or_else(|_| Self::DEFAULT_LOGIN_URL.into()),
            username: std::env::var("SALESFORCE_USERNAME").ok(),
            password: std::env::var("SALESFORCE_PASSWORD").ok(),
        }
    }

    /// Username and password, or the request-time configuration error.
    pub fn credentials(&self) -> Result<(&str, &str), AppError> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: Option<&str>, password: Option<&str>) -> Config {
        Config {
            login_url: Config::DEFAULT_LOGIN_URL.into(),
            username: username.map(Into::into),
            password: password.map(Into::into),
        }
    }

    #[test]
    fn credentials_present() {
        let c = config(Some("user@example.com"), Some("hunter2"));
        assert_eq!(c.credentials().unwrap(), ("user@example.com", "hunter2"));
    }

    #[test]
    fn credentials_missing_either_half_is_an_error() {
        assert!(config(None, Some("hunter2")).credentials().is_err());
        assert!(config(Some("user@example.com"), None).credentials().is_err());
        assert!(config(None, None).credentials().is_err());
    }
}
