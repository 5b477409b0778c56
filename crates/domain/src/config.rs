// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard configuration schema.
//!
//! The configuration is stored as flat `Key | Value | Description` rows,
//! where keys are dot-separated paths such as `costs.vatRate`. The mapping
//! between the typed schema and the flat rows is written out explicitly in
//! `to_entries` and `apply_entry`; every key listed by one is accepted by
//! the other.
//!
//! Scalar values are stored as their display form, recipient lists as
//! comma-separated strings, and carrier lists as JSON arrays.

use crate::error::DomainError;
use crate::types::ProductSize;
use serde::{Deserialize, Serialize};

/// Default dimensions and weight for one product size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeConfig {
    pub dimensions: crate::types::Dimensions,
    pub default_quantity: u32,
    pub average_weight: f64,
}

/// Size defaults keyed by size class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeTable {
    #[serde(rename = "S")]
    pub s: SizeConfig,
    #[serde(rename = "M")]
    pub m: SizeConfig,
    #[serde(rename = "L")]
    pub l: SizeConfig,
}

impl SizeTable {
    /// Returns the defaults for one size class.
    #[must_use]
    pub const fn get(&self, size: ProductSize) -> &SizeConfig {
        match size {
            ProductSize::S => &self.s,
            ProductSize::M => &self.m,
            ProductSize::L => &self.l,
        }
    }

    const fn get_mut(&mut self, size: ProductSize) -> &mut SizeConfig {
        match size {
            ProductSize::S => &mut self.s,
            ProductSize::M => &mut self.m,
            ProductSize::L => &mut self.l,
        }
    }
}

/// Carrier vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierKind {
    Container,
    Truck,
}

/// Carrier load capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierCapacity {
    /// Cubic metres.
    pub volume: f64,
    /// Kilograms.
    pub weight: f64,
}

/// Carrier contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierContact {
    pub phone: String,
    pub email: String,
}

/// A contracted carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CarrierKind,
    /// Rate in VND per unit.
    pub rate_per_unit: f64,
    pub capacity: CarrierCapacity,
    #[serde(default)]
    pub features: Vec<String>,
    pub contact_info: CarrierContact,
}

/// Carriers grouped by class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Carriers {
    #[serde(default)]
    pub container: Vec<CarrierInfo>,
    #[serde(default)]
    pub truck: Vec<CarrierInfo>,
}

/// Cost surcharges, all in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSettings {
    pub vat_rate: f64,
    pub handling_fee: f64,
    pub insurance_fee: f64,
    pub other_fees: f64,
}

/// Per-event chat notification switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramToggles {
    pub trip_completed: bool,
    pub daily_report: bool,
    pub alerts: bool,
}

/// Chat notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    pub enabled: bool,
    pub notifications: TelegramToggles,
}

/// Mail delivery service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailService {
    Smtp,
    Sendgrid,
}

impl EmailService {
    /// Returns the string representation of the service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Smtp => "smtp",
            Self::Sendgrid => "sendgrid",
        }
    }
}

/// Cron expressions for each report period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSchedules {
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
    pub quarterly: String,
    pub yearly: String,
}

/// Mail notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    pub service: EmailService,
    pub from: String,
    pub to: Vec<String>,
    pub enabled: bool,
    pub schedules: EmailSchedules,
}

/// Notification channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub telegram: TelegramSettings,
    pub email: EmailSettings,
}

/// The complete dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub sizes: SizeTable,
    #[serde(default)]
    pub carriers: Carriers,
    pub costs: CostSettings,
    pub notifications: NotificationSettings,
}

/// One flattened configuration row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub description: String,
}

impl ConfigEntry {
    fn new(key: String, value: String) -> Self {
        let description: String = describe(&key);
        Self {
            key,
            value,
            description,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let size = |length: f64, width: f64, height: f64, average_weight: f64| SizeConfig {
            dimensions: crate::types::Dimensions {
                length,
                width,
                height,
            },
            default_quantity: 1,
            average_weight,
        };
        Self {
            sizes: SizeTable {
                s: size(50.0, 35.0, 20.0, 1.8),
                m: size(60.0, 40.0, 25.0, 2.5),
                l: size(75.0, 50.0, 30.0, 3.5),
            },
            carriers: Carriers::default(),
            costs: CostSettings {
                vat_rate: 10.0,
                handling_fee: 0.0,
                insurance_fee: 0.0,
                other_fees: 0.0,
            },
            notifications: NotificationSettings {
                telegram: TelegramSettings {
                    bot_token: String::new(),
                    chat_id: String::new(),
                    enabled: false,
                    notifications: TelegramToggles {
                        trip_completed: true,
                        daily_report: true,
                        alerts: true,
                    },
                },
                email: EmailSettings {
                    service: EmailService::Smtp,
                    from: String::from("logistics@company.com"),
                    to: Vec::new(),
                    enabled: false,
                    schedules: EmailSchedules {
                        daily: String::from("0 18 * * *"),
                        weekly: String::from("0 8 * * 1"),
                        monthly: String::from("0 8 1 * *"),
                        quarterly: String::from("0 8 1 1,4,7,10 *"),
                        yearly: String::from("0 8 1 1 *"),
                    },
                },
            },
        }
    }
}

const SIZES: [ProductSize; 3] = [ProductSize::S, ProductSize::M, ProductSize::L];

impl DashboardConfig {
    /// Flattens the configuration into key/value rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the carrier lists cannot be encoded.
    pub fn to_entries(&self) -> Result<Vec<ConfigEntry>, DomainError> {
        let mut entries: Vec<ConfigEntry> = Vec::new();
        let mut push = |key: String, value: String| entries.push(ConfigEntry::new(key, value));

        for size in SIZES {
            let prefix: String = format!("sizes.{}", size.as_str());
            let cfg: &SizeConfig = self.sizes.get(size);
            push(
                format!("{prefix}.dimensions.length"),
                cfg.dimensions.length.to_string(),
            );
            push(
                format!("{prefix}.dimensions.width"),
                cfg.dimensions.width.to_string(),
            );
            push(
                format!("{prefix}.dimensions.height"),
                cfg.dimensions.height.to_string(),
            );
            push(
                format!("{prefix}.defaultQuantity"),
                cfg.default_quantity.to_string(),
            );
            push(
                format!("{prefix}.averageWeight"),
                cfg.average_weight.to_string(),
            );
        }

        push(
            String::from("carriers.container"),
            encode_carriers("carriers.container", &self.carriers.container)?,
        );
        push(
            String::from("carriers.truck"),
            encode_carriers("carriers.truck", &self.carriers.truck)?,
        );

        push(String::from("costs.vatRate"), self.costs.vat_rate.to_string());
        push(
            String::from("costs.handlingFee"),
            self.costs.handling_fee.to_string(),
        );
        push(
            String::from("costs.insuranceFee"),
            self.costs.insurance_fee.to_string(),
        );
        push(
            String::from("costs.otherFees"),
            self.costs.other_fees.to_string(),
        );

        let telegram: &TelegramSettings = &self.notifications.telegram;
        push(
            String::from("notifications.telegram.botToken"),
            telegram.bot_token.clone(),
        );
        push(
            String::from("notifications.telegram.chatId"),
            telegram.chat_id.clone(),
        );
        push(
            String::from("notifications.telegram.enabled"),
            telegram.enabled.to_string(),
        );
        push(
            String::from("notifications.telegram.notifications.tripCompleted"),
            telegram.notifications.trip_completed.to_string(),
        );
        push(
            String::from("notifications.telegram.notifications.dailyReport"),
            telegram.notifications.daily_report.to_string(),
        );
        push(
            String::from("notifications.telegram.notifications.alerts"),
            telegram.notifications.alerts.to_string(),
        );

        let email: &EmailSettings = &self.notifications.email;
        push(
            String::from("notifications.email.service"),
            email.service.as_str().to_string(),
        );
        push(String::from("notifications.email.from"), email.from.clone());
        push(String::from("notifications.email.to"), email.to.join(","));
        push(
            String::from("notifications.email.enabled"),
            email.enabled.to_string(),
        );
        let schedules: [(&str, &String); 5] = [
            ("daily", &email.schedules.daily),
            ("weekly", &email.schedules.weekly),
            ("monthly", &email.schedules.monthly),
            ("quarterly", &email.schedules.quarterly),
            ("yearly", &email.schedules.yearly),
        ];
        for (name, cron) in schedules {
            push(
                format!("notifications.email.schedules.{name}"),
                cron.clone(),
            );
        }

        Ok(entries)
    }

    /// Sets the field addressed by a flattened key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownConfigKey` if the key is not part of the
    /// schema, or `DomainError::InvalidConfigValue` if the value does not
    /// parse as the field's type.
    pub fn apply_entry(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        if let Some(rest) = key.strip_prefix("sizes.") {
            return self.apply_size_entry(key, rest, value);
        }

        let telegram: &mut TelegramSettings = &mut self.notifications.telegram;
        let email: &mut EmailSettings = &mut self.notifications.email;

        match key {
            "carriers.container" => self.carriers.container = decode_carriers(key, value)?,
            "carriers.truck" => self.carriers.truck = decode_carriers(key, value)?,
            "costs.vatRate" => self.costs.vat_rate = parse_f64(key, value)?,
            "costs.handlingFee" => self.costs.handling_fee = parse_f64(key, value)?,
            "costs.insuranceFee" => self.costs.insurance_fee = parse_f64(key, value)?,
            "costs.otherFees" => self.costs.other_fees = parse_f64(key, value)?,
            "notifications.telegram.botToken" => telegram.bot_token = value.to_string(),
            "notifications.telegram.chatId" => telegram.chat_id = value.to_string(),
            "notifications.telegram.enabled" => telegram.enabled = parse_bool(key, value)?,
            "notifications.telegram.notifications.tripCompleted" => {
                telegram.notifications.trip_completed = parse_bool(key, value)?;
            }
            "notifications.telegram.notifications.dailyReport" => {
                telegram.notifications.daily_report = parse_bool(key, value)?;
            }
            "notifications.telegram.notifications.alerts" => {
                telegram.notifications.alerts = parse_bool(key, value)?;
            }
            "notifications.email.service" => {
                email.service = match value.trim().to_lowercase().as_str() {
                    "smtp" => EmailService::Smtp,
                    "sendgrid" => EmailService::Sendgrid,
                    _ => return Err(invalid(key, value, "expected 'smtp' or 'sendgrid'")),
                };
            }
            "notifications.email.from" => email.from = value.to_string(),
            "notifications.email.to" => {
                email.to = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            "notifications.email.enabled" => email.enabled = parse_bool(key, value)?,
            "notifications.email.schedules.daily" => email.schedules.daily = value.to_string(),
            "notifications.email.schedules.weekly" => email.schedules.weekly = value.to_string(),
            "notifications.email.schedules.monthly" => {
                email.schedules.monthly = value.to_string();
            }
            "notifications.email.schedules.quarterly" => {
                email.schedules.quarterly = value.to_string();
            }
            "notifications.email.schedules.yearly" => email.schedules.yearly = value.to_string(),
            _ => return Err(DomainError::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }

    fn apply_size_entry(&mut self, key: &str, rest: &str, value: &str) -> Result<(), DomainError> {
        let (code, field): (&str, &str) = rest
            .split_once('.')
            .ok_or_else(|| DomainError::UnknownConfigKey(key.to_string()))?;
        let size: ProductSize = match code {
            "S" => ProductSize::S,
            "M" => ProductSize::M,
            "L" => ProductSize::L,
            _ => return Err(DomainError::UnknownConfigKey(key.to_string())),
        };
        let cfg: &mut SizeConfig = self.sizes.get_mut(size);
        match field {
            "dimensions.length" => cfg.dimensions.length = parse_f64(key, value)?,
            "dimensions.width" => cfg.dimensions.width = parse_f64(key, value)?,
            "dimensions.height" => cfg.dimensions.height = parse_f64(key, value)?,
            "defaultQuantity" => {
                cfg.default_quantity = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| invalid(key, value, &e.to_string()))?;
            }
            "averageWeight" => cfg.average_weight = parse_f64(key, value)?,
            _ => return Err(DomainError::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }

    /// Rebuilds a configuration from flattened rows, starting from defaults.
    ///
    /// Rows with an empty key or value are skipped. Rows that cannot be
    /// applied are returned alongside the configuration so the caller can
    /// report them; they do not abort the load.
    pub fn from_entries<'a, I>(entries: I) -> (Self, Vec<DomainError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config: Self = Self::default();
        let mut rejected: Vec<DomainError> = Vec::new();
        for (key, value) in entries {
            if key.trim().is_empty() || value.is_empty() {
                continue;
            }
            if let Err(e) = config.apply_entry(key.trim(), value) {
                rejected.push(e);
            }
        }
        (config, rejected)
    }
}

fn describe(key: &str) -> String {
    let known: &str = match key {
        "sizes.S.dimensions.length" | "sizes.M.dimensions.length" | "sizes.L.dimensions.length" => {
            "Package length for this size (cm)"
        }
        "sizes.S.dimensions.width" | "sizes.M.dimensions.width" | "sizes.L.dimensions.width" => {
            "Package width for this size (cm)"
        }
        "sizes.S.dimensions.height" | "sizes.M.dimensions.height" | "sizes.L.dimensions.height" => {
            "Package height for this size (cm)"
        }
        "sizes.S.averageWeight" | "sizes.M.averageWeight" | "sizes.L.averageWeight" => {
            "Average package weight for this size (kg)"
        }
        "costs.vatRate" => "VAT rate (%)",
        "costs.handlingFee" => "Handling fee (%)",
        "costs.insuranceFee" => "Insurance fee (%)",
        "costs.otherFees" => "Other fees (%)",
        "carriers.container" => "Container carriers (JSON)",
        "carriers.truck" => "Truck carriers (JSON)",
        "notifications.telegram.enabled" => "Enable Telegram notifications",
        "notifications.email.enabled" => "Enable email notifications",
        "notifications.email.to" => "Report recipients (comma separated)",
        _ => "System setting",
    };
    known.to_string()
}

fn parse_f64(key: &str, value: &str) -> Result<f64, DomainError> {
    let parsed: f64 = value
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(key, value, &e.to_string()))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(invalid(key, value, "value must be finite"))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value, "expected 'true' or 'false'")),
    }
}

fn encode_carriers(key: &str, carriers: &[CarrierInfo]) -> Result<String, DomainError> {
    serde_json::to_string(carriers).map_err(|e| invalid(key, "<carriers>", &e.to_string()))
}

fn decode_carriers(key: &str, value: &str) -> Result<Vec<CarrierInfo>, DomainError> {
    serde_json::from_str(value).map_err(|e| invalid(key, value, &e.to_string()))
}

fn invalid(key: &str, value: &str, reason: &str) -> DomainError {
    DomainError::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
