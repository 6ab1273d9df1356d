use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::path::Path;

use crate::config::environment::{Config, MailTransportConfig};

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("{0}")]
    File(#[from] lettre::transport::file::Error),

    #[error("failed to create mail directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound mail, either through a real SMTP relay or a local directory
/// of .eml files in development.
pub struct Mailer {
    transport: MailTransport,
    from: Mailbox,
}

enum MailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, MailerError> {
        match &config.mail_transport {
            MailTransportConfig::Smtp {
                host,
                port,
                username,
                password,
            } => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(*port);
                if !username.is_empty() {
                    builder =
                        builder.credentials(Credentials::new(username.clone(), password.clone()));
                }
                Ok(Self {
                    transport: MailTransport::Smtp(builder.build()),
                    from: config.mail_from.parse()?,
                })
            }
            MailTransportConfig::File { dir } => Self::file(dir, &config.mail_from),
        }
    }

    /// File-backed mailer writing messages under `dir`. Used in development
    /// and by the test suite.
    pub fn file(dir: impl AsRef<Path>, from: &str) -> Result<Self, MailerError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            transport: MailTransport::File(AsyncFileTransport::<Tokio1Executor>::new(dir)),
            from: from.parse()?,
        })
    }

    /// True when mail lands in a local directory instead of a real inbox.
    pub fn delivers_locally(&self) -> bool {
        matches!(self.transport, MailTransport::File(_))
    }

    pub async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject("Password Reset OTP - SecureAI")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your password reset OTP is: {code}\n\n\
                 This OTP is valid for 10 minutes.\n\n\
                 If you didn't request this, please ignore this email."
            ))?;

        match &self.transport {
            MailTransport::Smtp(smtp) => {
                smtp.send(message).await?;
            }
            MailTransport::File(file) => {
                file.send(message).await?;
            }
        }

        Ok(())
    }
}
