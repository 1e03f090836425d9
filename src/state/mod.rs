mod topic_grid;

pub(crate) use topic_grid::TopicGridController;

use crate::api::{ApiClient, EnvConfig};
use crate::research::{ResearchTopics, MAX_RESEARCH_TOPICS};
use crate::schedule::DeliverySchedule;
use crate::storage::load_profile;
use crate::taxonomy::Locale;
use crate::topics::{Selection, MAX_TOTAL_SUBJECTS};
use crate::trackers::{TrackerList, MAX_TRACKERS};
use leptos::prelude::*;

/// Onboarding answers shared across the wizard's screens.
#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub locale: Locale,

    /// Written back by the topics screen; the tree itself is per-presentation.
    pub selection: RwSignal<Selection>,
    pub research: RwSignal<ResearchTopics>,
    pub trackers: RwSignal<TrackerList>,
    pub schedule: RwSignal<DeliverySchedule>,
}

impl AppState {
    pub fn new() -> Self {
        let env = EnvConfig::new();
        let profile = load_profile();
        let locale = env.locale();
        log::info!("onboarding api={} locale={locale:?}", env.api_url);

        Self {
            api_client: RwSignal::new(ApiClient::from_env(&env)),
            locale,
            selection: RwSignal::new(Selection::restore(
                MAX_TOTAL_SUBJECTS,
                &profile.topics,
                &profile.detail_levels,
            )),
            research: RwSignal::new(ResearchTopics::restore(
                MAX_RESEARCH_TOPICS,
                &profile.research_topics,
            )),
            trackers: RwSignal::new(TrackerList::restore(MAX_TRACKERS, &profile.trackers)),
            schedule: RwSignal::new(profile.schedule.unwrap_or_default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
