use std::env;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub mail_from: String,
    pub mail_transport: MailTransportConfig,
    pub debug: bool,
}

pub enum MailTransportConfig {
    /// Write outbound mail to a local directory (development mode).
    File { dir: String },
    /// Deliver through a real SMTP relay.
    Smtp {
        host: String,
        port: u16,
        username: String,
        password: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://secureai.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;

        let mail_from = env::var("MAIL_FROM")
            .unwrap_or_else(|_| "noreply@secureai.local".to_string());

        let debug = env::var("APP_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let mail_transport = match env::var("MAIL_TRANSPORT").as_deref() {
            Ok("smtp") => {
                let host = env::var("SMTP_HOST")
                    .map_err(|_| "SMTP_HOST must be set when MAIL_TRANSPORT=smtp".to_string())?;
                let port = match env::var("SMTP_PORT") {
                    Ok(p) => p
                        .parse::<u16>()
                        .map_err(|_| "SMTP_PORT must be a valid port number".to_string())?,
                    Err(_) => 587,
                };
                MailTransportConfig::Smtp {
                    host,
                    port,
                    username: env::var("SMTP_USERNAME").unwrap_or_default(),
                    password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                }
            }
            _ => MailTransportConfig::File {
                dir: env::var("MAIL_FILE_DIR").unwrap_or_else(|_| "./outbox".to_string()),
            },
        };

        Ok(Self {
            database_url,
            jwt_secret,
            mail_from,
            mail_transport,
            debug,
        })
    }
}
