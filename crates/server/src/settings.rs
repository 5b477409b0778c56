// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Process settings and adapter construction.
//!
//! Every setting can come from a flag or its environment variable. Blank
//! values and template placeholders (`your-...`) count as absent, and an
//! absent backend leaves the matching adapter unconfigured rather than
//! failing startup.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use fleetdash_api::Services;
use fleetdash_domain::{BaselineScorer, parse_timezone};
use fleetdash_notify::{
    BotApi, ChatSettings, MailSettings, MailTransport, Mailer, SendGridTransport, SmtpSettings,
    SmtpTransport, TelegramBotApi, TelegramNotifier, parse_recipients,
};
use fleetdash_persistence::{
    ConfigStore, ServiceAccount, SheetsTabularStore, SqliteTabularStore, TabularStore, TripStore,
};
use tracing::{info, warn};

/// Mail delivery backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MailService {
    Smtp,
    Sendgrid,
}

/// fleetdash - logistics trip dashboard server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the server to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path to the local `SQLite` database used when no spreadsheet is
    /// configured. Without either, trips are not stored.
    #[arg(short, long, env = "DATABASE_PATH")]
    pub database: Option<String>,

    /// Google Sheets spreadsheet id
    #[arg(long, env = "GOOGLE_SHEETS_ID")]
    pub sheets_id: Option<String>,

    /// Service account client email
    #[arg(long, env = "GOOGLE_CLIENT_EMAIL")]
    pub google_client_email: Option<String>,

    /// Service account private key (PEM, `\n` escapes allowed)
    #[arg(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true)]
    pub google_private_key: Option<String>,

    #[arg(long, env = "EMAIL_SERVICE", value_enum, default_value_t = MailService::Smtp)]
    pub email_service: MailService,

    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USER")]
    pub smtp_user: Option<String>,

    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    pub smtp_pass: Option<String>,

    #[arg(long, env = "SENDGRID_API_KEY", hide_env_values = true)]
    pub sendgrid_api_key: Option<String>,

    /// Sender address for report mail
    #[arg(long, env = "EMAIL_FROM", default_value = "logistics@company.com")]
    pub email_from: String,

    /// Comma-separated report recipients
    #[arg(long, env = "EMAIL_TO", default_value = "")]
    pub email_to: String,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Bearer secret for `/cron/*` and `PUT /config`. Unset rejects them all.
    #[arg(long, env = "CRON_SECRET", hide_env_values = true)]
    pub cron_secret: Option<String>,

    /// Public base URL, used for dashboard links and the webhook address
    #[arg(long, env = "APP_URL", default_value = "http://localhost:3000")]
    pub app_url: String,

    #[arg(long, env = "APP_NAME", default_value = "Logistics Dashboard")]
    pub app_name: String,

    /// IANA timezone report windows are computed in
    #[arg(long, env = "REPORT_TIMEZONE", default_value = "Asia/Ho_Chi_Minh")]
    pub timezone: String,

    /// Cost efficiency percentage reported until a baseline is recorded
    #[arg(long, env = "COST_EFFICIENCY_BASELINE", default_value_t = 88.0)]
    pub cost_efficiency: f64,

    /// Fuel efficiency percentage reported until a baseline is recorded
    #[arg(long, env = "FUEL_EFFICIENCY_BASELINE", default_value_t = 92.0)]
    pub fuel_efficiency: f64,

    /// Reject trip status changes the lifecycle does not allow
    #[arg(long, env = "STRICT_LIFECYCLE")]
    pub strict_lifecycle: bool,

    /// Timeout for outbound HTTP and SMTP calls, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

/// Returns the value if it is set, non-blank and not a template placeholder.
fn credential(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.starts_with("your-"))
}

/// Picks the trip log backend: Google Sheets when fully configured, else a
/// `SQLite` file when a path is given, else none.
fn build_tabular_store(
    args: &Args,
    timeout: Duration,
) -> Result<Option<Arc<dyn TabularStore>>, Box<dyn std::error::Error>> {
    let account: Option<ServiceAccount> = match (
        credential(args.google_client_email.as_deref()),
        credential(args.google_private_key.as_deref()),
    ) {
        (Some(email), Some(key)) => ServiceAccount::from_parts(email, key),
        _ => None,
    };

    let sheets: Option<SheetsTabularStore> =
        match (credential(args.sheets_id.as_deref()), account) {
            (Some(sheets_id), Some(account)) => {
                SheetsTabularStore::new(sheets_id, account, timeout)?
            }
            (Some(_), None) => {
                warn!("Spreadsheet id set without service account credentials, ignoring it");
                None
            }
            (None, _) => None,
        };
    if let Some(store) = sheets {
        info!("Using Google Sheets trip store");
        return Ok(Some(Arc::new(store)));
    }

    match credential(args.database.as_deref()) {
        Some(path) => {
            info!("Using file-based database at: {}", path);
            Ok(Some(Arc::new(SqliteTabularStore::new_with_file(path)?)))
        }
        None => {
            warn!("No spreadsheet or database path configured, trips will not be stored");
            Ok(None)
        }
    }
}

fn build_mail_transport(
    args: &Args,
    timeout: Duration,
) -> Result<Option<Arc<dyn MailTransport>>, Box<dyn std::error::Error>> {
    match args.email_service {
        MailService::Smtp => {
            let Some(username) = credential(args.smtp_user.as_deref()) else {
                return Ok(None);
            };
            let settings: SmtpSettings = SmtpSettings {
                host: args.smtp_host.clone(),
                port: args.smtp_port,
                username: username.to_string(),
                password: credential(args.smtp_pass.as_deref())
                    .unwrap_or_default()
                    .to_string(),
                timeout,
            };
            Ok(Some(Arc::new(SmtpTransport::new(&settings)?)))
        }
        MailService::Sendgrid => {
            let Some(api_key) = credential(args.sendgrid_api_key.as_deref()) else {
                return Ok(None);
            };
            Ok(Some(Arc::new(SendGridTransport::new(api_key, timeout)?)))
        }
    }
}

fn build_mailer(
    args: &Args,
    timezone: Tz,
    timeout: Duration,
) -> Result<Mailer, Box<dyn std::error::Error>> {
    let settings: MailSettings = MailSettings {
        from: args.email_from.clone(),
        recipients: parse_recipients(&args.email_to),
        app_name: args.app_name.clone(),
        app_url: args.app_url.clone(),
        timezone,
    };

    Ok(match build_mail_transport(args, timeout)? {
        Some(transport) => {
            info!(
                service = transport.service_name(),
                recipients = settings.recipients.len(),
                "Mail transport configured"
            );
            Mailer::new(transport, settings)
        }
        None => {
            warn!("Mail credentials not configured, mail is disabled");
            Mailer::unconfigured(settings)
        }
    })
}

fn build_telegram(
    args: &Args,
    timezone: Tz,
    timeout: Duration,
) -> Result<TelegramNotifier, Box<dyn std::error::Error>> {
    let settings: ChatSettings = ChatSettings {
        chat_id: credential(args.telegram_chat_id.as_deref())
            .unwrap_or_default()
            .to_string(),
        app_url: args.app_url.clone(),
        timezone,
    };

    let Some(token) = credential(args.telegram_bot_token.as_deref()) else {
        warn!("Telegram bot token not configured, chat is disabled");
        return Ok(TelegramNotifier::unconfigured(settings));
    };
    let bot: Arc<dyn BotApi> = Arc::new(TelegramBotApi::new(token, timeout)?);
    let notifier: TelegramNotifier = TelegramNotifier::new(bot, settings);
    if notifier.is_configured() {
        info!("Telegram bot configured");
    } else {
        warn!("Telegram chat id not configured, chat is disabled");
    }
    Ok(notifier)
}

/// Builds every adapter from the process settings.
///
/// # Errors
///
/// Returns an error if the timezone is invalid, the local database cannot
/// be opened, or an HTTP or SMTP client cannot be constructed.
pub fn build_services(args: &Args) -> Result<Services, Box<dyn std::error::Error>> {
    let timezone: Tz = parse_timezone(&args.timezone)?;
    let timeout: Duration = Duration::from_secs(args.http_timeout_secs);

    let (trip_store, config_store): (TripStore, ConfigStore) =
        match build_tabular_store(args, timeout)? {
            Some(backend) => (
                TripStore::new(Arc::clone(&backend)),
                ConfigStore::new(backend),
            ),
            None => (TripStore::unconfigured(), ConfigStore::unconfigured()),
        };
    let cron_secret: Option<String> = credential(args.cron_secret.as_deref()).map(String::from);
    if cron_secret.is_none() {
        warn!("Cron secret not configured, scheduler endpoints will reject every request");
    }

    Ok(Services {
        trip_store,
        config_store,
        mailer: build_mailer(args, timezone, timeout)?,
        telegram: build_telegram(args, timezone, timeout)?,
        scorer: Arc::new(BaselineScorer::new(args.cost_efficiency, args.fuel_efficiency)),
        timezone,
        cron_secret,
        strict_lifecycle: args.strict_lifecycle,
    })
}
