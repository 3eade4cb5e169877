use std::{fmt, str::FromStr};

use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, ReadError, UpdateError, ValidationError};

pub const REST_DAY_WARNING_DEFAULT: u32 = 3;

#[allow(async_fn_in_trait)]
pub trait SettingService {
    async fn get_settings(&self) -> Result<Vec<Setting>, ReadError>;
    async fn get_rest_day_warning(&self) -> Result<u32, ReadError>;
    async fn set_rest_day_warning(&self, days: u32) -> Result<Setting, UpdateError>;

    fn validate_rest_day_warning(&self, days: &str) -> Result<u32, ValidationError> {
        match days.trim().parse::<u32>() {
            Ok(parsed_days) if (1..=30).contains(&parsed_days) => Ok(parsed_days),
            Ok(_) | Err(_) => Err(ValidationError::Other(
                "Warning threshold must be between 1 and 30 days".into(),
            )),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SettingRepository {
    async fn read_settings(&self) -> Result<Vec<Setting>, ReadError>;
    async fn create_setting(
        &self,
        key: SettingKey,
        value: SettingValue,
    ) -> Result<Setting, CreateError>;
    async fn modify_setting(&self, id: SettingID, value: SettingValue)
    -> Result<Setting, UpdateError>;
}

/// A per-user setting persisted on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub id: SettingID,
    pub key: SettingKey,
    pub value: SettingValue,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SettingID(Uuid);

impl SettingID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SettingID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SettingID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    RestDayWarning,
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SettingKey::RestDayWarning => "restDayWarning",
            }
        )
    }
}

impl FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "restDayWarning" => Ok(SettingKey::RestDayWarning),
            _ => Err(UnknownSettingKey(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown setting key: {0}")]
pub struct UnknownSettingKey(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Integer(i64),
    Boolean(bool),
    Text(String),
}

/// The rest-day warning threshold in days, falling back to the default for a
/// missing, malformed or out-of-range setting.
#[must_use]
pub fn rest_day_warning(settings: &[Setting]) -> u32 {
    settings
        .iter()
        .find(|s| s.key == SettingKey::RestDayWarning)
        .and_then(|s| match s.value {
            SettingValue::Integer(days) if days >= 1 => u32::try_from(days).ok(),
            _ => None,
        })
        .unwrap_or(REST_DAY_WARNING_DEFAULT)
}
