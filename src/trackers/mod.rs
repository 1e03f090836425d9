use serde::{Deserialize, Serialize};

pub(crate) const MAX_TRACKERS: usize = 5;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum TrackerKind {
    #[default]
    LeagueSchedule,
    LeagueStanding,
    AssetPrice,
}

impl TrackerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrackerKind::LeagueSchedule => "League schedule",
            TrackerKind::LeagueStanding => "League standings",
            TrackerKind::AssetPrice => "Asset price",
        }
    }
}

/// A structured item followed alongside news topics.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub(crate) enum Tracker {
    LeagueSchedule {
        #[serde(rename = "competition-id")]
        competition_id: String,
        name: String,
    },
    LeagueStanding {
        #[serde(rename = "competition-id")]
        competition_id: String,
        name: String,
    },
    AssetPrice { symbol: String, name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TrackerError {
    MissingKey,
    MissingName,
    Duplicate,
    LimitReached { max: usize },
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::MissingKey => write!(f, "Enter a competition id or ticker symbol."),
            TrackerError::MissingName => write!(f, "Enter a display name."),
            TrackerError::Duplicate => write!(f, "You're already tracking that."),
            TrackerError::LimitReached { max } => {
                write!(f, "Maximum reached: you can add up to {max} trackers.")
            }
        }
    }
}

impl Tracker {
    pub fn new(kind: TrackerKind, key: &str, name: &str) -> Result<Self, TrackerError> {
        let key = key.trim();
        let name = name.trim();
        if key.is_empty() {
            return Err(TrackerError::MissingKey);
        }
        if name.is_empty() {
            return Err(TrackerError::MissingName);
        }

        let name = name.to_string();
        Ok(match kind {
            TrackerKind::LeagueSchedule => Tracker::LeagueSchedule {
                competition_id: key.to_string(),
                name,
            },
            TrackerKind::LeagueStanding => Tracker::LeagueStanding {
                competition_id: key.to_string(),
                name,
            },
            TrackerKind::AssetPrice => Tracker::AssetPrice {
                symbol: key.to_ascii_uppercase(),
                name,
            },
        })
    }

    pub fn kind(&self) -> TrackerKind {
        match self {
            Tracker::LeagueSchedule { .. } => TrackerKind::LeagueSchedule,
            Tracker::LeagueStanding { .. } => TrackerKind::LeagueStanding,
            Tracker::AssetPrice { .. } => TrackerKind::AssetPrice,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Tracker::LeagueSchedule { competition_id, .. }
            | Tracker::LeagueStanding { competition_id, .. } => competition_id,
            Tracker::AssetPrice { symbol, .. } => symbol,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tracker::LeagueSchedule { name, .. }
            | Tracker::LeagueStanding { name, .. }
            | Tracker::AssetPrice { name, .. } => name,
        }
    }

    fn same_target(&self, other: &Tracker) -> bool {
        self.kind() == other.kind() && self.key() == other.key()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TrackerList {
    items: Vec<Tracker>,
    max: usize,
}

impl Default for TrackerList {
    fn default() -> Self {
        Self::new(MAX_TRACKERS)
    }
}

impl TrackerList {
    pub fn new(max: usize) -> Self {
        Self { items: vec![], max }
    }

    pub fn restore(max: usize, saved: &[Tracker]) -> Self {
        let mut list = Self::new(max);
        for t in saved {
            let _ = list.add(t.clone());
        }
        list
    }

    pub fn items(&self) -> &[Tracker] {
        &self.items
    }

    pub fn add(&mut self, tracker: Tracker) -> Result<(), TrackerError> {
        if self.items.iter().any(|t| t.same_target(&tracker)) {
            return Err(TrackerError::Duplicate);
        }
        if self.items.len() >= self.max {
            return Err(TrackerError::LimitReached { max: self.max });
        }
        self.items.push(tracker);
        Ok(())
    }

    pub fn remove(&mut self, kind: TrackerKind, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| !(t.kind() == kind && t.key() == key));
        self.items.len() != before
    }
}
