use chrono_tz::Tz;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Time zone in which reminder due times are entered and displayed.
    /// Fixed per process, not per user.
    pub timezone: Tz,
    /// SMTP transport settings, `None` when email delivery is not
    /// configured
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        let default_timezone = "Europe/Athens";
        let timezone = std::env::var("TIMEZONE").unwrap_or(default_timezone.into());
        let timezone = match timezone.parse::<Tz>() {
            Ok(timezone) => timezone,
            Err(_) => {
                warn!(
                    "The given TIMEZONE: {} is not a valid IANA time zone, falling back to the default: {}.",
                    timezone, default_timezone
                );
                default_timezone.parse::<Tz>().unwrap()
            }
        };
        let smtp = SmtpConfig::from_env();
        if smtp.is_none() {
            info!("Did not find a complete SMTP configuration. Email delivery will be disabled.");
        }
        Self {
            port,
            timezone,
            smtp,
        }
    }
}

impl SmtpConfig {
    /// Reads the SMTP settings from the environment. `SMTP_HOST`,
    /// `SMTP_USERNAME`, `SMTP_PASSWORD` and `SMTP_TO` are all required
    /// for the transport to be considered configured.
    fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;
        let to = std::env::var("SMTP_TO").ok()?;
        let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone());
        let default_port = "587";
        let port = std::env::var("SMTP_PORT").unwrap_or(default_port.into());
        let port = match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given SMTP_PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<u16>().unwrap()
            }
        };
        Some(Self {
            host,
            port,
            username,
            password,
            from,
            to,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
