mod mail;

pub use mail::{IMailService, InMemoryMailService, Mail, SmtpMailService, UnconfiguredMailService};
