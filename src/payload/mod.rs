use crate::models::{DetailLevel, SavedProfile};
use crate::research::ResearchTopics;
use crate::schedule::{DeliverySchedule, ScheduleError};
use crate::topics::Selection;
use crate::trackers::{Tracker, TrackerList};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TopicPreference {
    pub name: String,
    pub detail: DetailLevel,
}

/// Request body for saving onboarding preferences.
///
/// Keys follow the backend's kebab-case convention.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PreferencesPayload {
    pub topics: Vec<TopicPreference>,
    #[serde(rename = "research-topics")]
    pub research_topics: Vec<String>,
    pub trackers: Vec<Tracker>,
    pub schedule: DeliverySchedule,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PayloadError {
    NothingSelected,
    Schedule(ScheduleError),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::NothingSelected => {
                write!(f, "Pick at least one topic or research topic.")
            }
            PayloadError::Schedule(e) => write!(f, "{e}"),
        }
    }
}

impl From<ScheduleError> for PayloadError {
    fn from(e: ScheduleError) -> Self {
        PayloadError::Schedule(e)
    }
}

impl PreferencesPayload {
    pub fn assemble(
        selection: &Selection,
        research: &ResearchTopics,
        trackers: &TrackerList,
        schedule: &DeliverySchedule,
    ) -> Result<Self, PayloadError> {
        if selection.is_empty() && research.items().is_empty() {
            return Err(PayloadError::NothingSelected);
        }
        schedule.validate()?;

        Ok(Self {
            topics: selection
                .iter()
                .map(|(name, detail)| TopicPreference {
                    name: name.to_string(),
                    detail,
                })
                .collect(),
            research_topics: research.items().to_vec(),
            trackers: trackers.items().to_vec(),
            schedule: schedule.clone().normalized()?,
        })
    }

    pub fn to_profile(&self) -> SavedProfile {
        SavedProfile {
            topics: self.topics.iter().map(|t| t.name.clone()).collect(),
            detail_levels: self.topics.iter().map(|t| t.detail).collect(),
            research_topics: self.research_topics.clone(),
            trackers: self.trackers.clone(),
            schedule: Some(self.schedule.clone()),
        }
    }
}
