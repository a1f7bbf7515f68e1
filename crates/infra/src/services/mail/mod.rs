mod smtp;

pub use smtp::SmtpMailService;

use std::sync::Mutex;

/// Outgoing mail transport for `email` channel deliveries
#[async_trait::async_trait]
pub trait IMailService: Send + Sync {
    async fn send(&self, subject: &str, body: &str, recipient: &str) -> anyhow::Result<()>;
}

/// Takes the place of the SMTP transport when no SMTP settings are
/// present. Every send fails so that a due `email` reminder surfaces a
/// delivery failure for that reminder instead of silently disappearing.
pub struct UnconfiguredMailService {}

#[async_trait::async_trait]
impl IMailService for UnconfiguredMailService {
    async fn send(&self, _subject: &str, _body: &str, _recipient: &str) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("SMTP transport is not configured"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

/// Records mails instead of sending them. Used by tests.
pub struct InMemoryMailService {
    pub sent: Mutex<Vec<Mail>>,
    broken: bool,
}

impl InMemoryMailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            broken: false,
        }
    }

    /// A transport where every send fails
    pub fn new_broken() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            broken: true,
        }
    }
}

impl Default for InMemoryMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailService for InMemoryMailService {
    async fn send(&self, subject: &str, body: &str, recipient: &str) -> anyhow::Result<()> {
        if self.broken {
            return Err(anyhow::Error::msg("SMTP server is unreachable"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(Mail {
            subject: subject.to_string(),
            body: body.to_string(),
            recipient: recipient.to_string(),
        });
        Ok(())
    }
}
