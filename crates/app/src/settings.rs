use std::fmt;

use firstrep_domain::{DaysPerWeek, InputError, SessionMinutes};

pub trait SettingsService {
    fn get_settings(&self) -> Result<Settings, String>;
    fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, String>;
    fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub days_per_week: u8,
    pub session_minutes: u32,
    pub weight_unit: WeightUnit,
}

impl Settings {
    /// Applies the given changes if all of them are valid.
    pub fn update(
        self,
        days_per_week: Option<f64>,
        session_minutes: Option<f64>,
        weight_unit: Option<WeightUnit>,
    ) -> Result<Self, InputError> {
        let mut settings = self;
        if let Some(days) = days_per_week {
            settings.days_per_week = DaysPerWeek::new(days)?.into();
        }
        if let Some(minutes) = session_minutes {
            SessionMinutes::new(minutes)?;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let minutes = minutes.round() as u32;
            settings.session_minutes = minutes;
        }
        if let Some(unit) = weight_unit {
            settings.weight_unit = unit;
        }
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days_per_week: 3,
            session_minutes: 45,
            weight_unit: WeightUnit::Pounds,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Pounds,
    Kilograms,
}

impl WeightUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Pounds => "lbs",
            WeightUnit::Kilograms => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
