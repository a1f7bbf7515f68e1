use super::IMailService;
use crate::config::SmtpConfig;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

/// Mail transport backed by an SMTP relay with STARTTLS, the way the
/// usual providers (gmail, outlook, ...) expect submissions on port 587
pub struct SmtpMailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailService {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();
        let from = config.from.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }
}

#[async_trait::async_trait]
impl IMailService for SmtpMailService {
    async fn send(&self, subject: &str, body: &str, recipient: &str) -> anyhow::Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse::<Mailbox>()?)
            .subject(subject)
            .body(body.to_string())?;
        self.transport.send(message).await?;
        Ok(())
    }
}
