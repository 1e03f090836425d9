use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub(crate) enum Frequency {
    Daily,
    Weekdays,
    Weekly { day: Weekday },
    Custom { days: Vec<Weekday> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScheduleError {
    InvalidTime(String),
    NoDays,
    MissingTimezone,
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidTime(t) => write!(f, "\"{t}\" is not a valid time (HH:MM)."),
            ScheduleError::NoDays => write!(f, "Pick at least one delivery day."),
            ScheduleError::MissingTimezone => write!(f, "Choose a timezone."),
        }
    }
}

/// When digests are delivered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct DeliverySchedule {
    pub frequency: Frequency,
    /// Local time, `HH:MM` (24h).
    pub time: String,
    pub timezone: String,
}

impl Default for DeliverySchedule {
    fn default() -> Self {
        Self {
            frequency: Frequency::Daily,
            time: "07:00".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

pub(crate) fn parse_time(s: &str) -> Result<(u8, u8), ScheduleError> {
    let invalid = || ScheduleError::InvalidTime(s.to_string());

    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hour: u8 = h.parse().map_err(|_| invalid())?;
    let minute: u8 = m.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

impl DeliverySchedule {
    pub fn validate(&self) -> Result<(), ScheduleError> {
        parse_time(&self.time)?;
        if self.timezone.trim().is_empty() {
            return Err(ScheduleError::MissingTimezone);
        }
        if self.delivery_days().is_empty() {
            return Err(ScheduleError::NoDays);
        }
        Ok(())
    }

    /// Days a digest goes out, Monday first, without duplicates.
    pub fn delivery_days(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = match &self.frequency {
            Frequency::Daily => Weekday::iter().collect(),
            Frequency::Weekdays => Weekday::iter().filter(|d| !d.is_weekend()).collect(),
            Frequency::Weekly { day } => vec![*day],
            Frequency::Custom { days } => days.clone(),
        };
        days.sort();
        days.dedup();
        days
    }

    /// Normalize the time to zero-padded `HH:MM`.
    pub fn normalized(mut self) -> Result<Self, ScheduleError> {
        let (h, m) = parse_time(&self.time)?;
        self.time = format!("{h:02}:{m:02}");
        self.timezone = self.timezone.trim().to_string();
        Ok(self)
    }

    pub fn summary(&self) -> String {
        let when = match &self.frequency {
            Frequency::Daily => "Every day".to_string(),
            Frequency::Weekdays => "Every weekday".to_string(),
            Frequency::Weekly { day } => format!("Every {day}"),
            Frequency::Custom { .. } => {
                let days = self
                    .delivery_days()
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("On {days}")
            }
        };
        format!("{when} at {} ({})", self.time, self.timezone)
    }
}
