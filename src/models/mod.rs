use crate::schedule::DeliverySchedule;
use crate::trackers::Tracker;
use serde::{Deserialize, Serialize};

/// Opaque identity of a topic-grid row.
///
/// Handed out by the tree's identity registry; the same `(parent path, name)`
/// always maps to the same id for the lifetime of a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "topic-{}", self.0)
    }
}

/// One visible row of the topic grid (category or subtopic).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TopicNode {
    pub id: NodeId,
    pub name: String,

    /// 0 for taxonomy roots.
    pub depth: usize,

    /// Back-reference only.
    pub parent_id: Option<NodeId>,

    /// Breadcrumb of ancestor names, e.g. `Sports > Football`. Also the cache key.
    pub path: String,
}

/// How much coverage the user wants for a selected topic.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum DetailLevel {
    Brief,
    #[default]
    Standard,
    InDepth,
}

impl DetailLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "Headlines",
            DetailLevel::Standard => "Summary",
            DetailLevel::InDepth => "In depth",
        }
    }
}

/// Everything the onboarding flow persists between presentations.
///
/// Tree topology (expansion, subtopic cache) is deliberately absent: only the
/// selection is restored when the topics screen is shown again.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct SavedProfile {
    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default, rename = "detail-levels")]
    pub detail_levels: Vec<DetailLevel>,

    #[serde(default, rename = "research-topics")]
    pub research_topics: Vec<String>,

    #[serde(default)]
    pub trackers: Vec<Tracker>,

    #[serde(default)]
    pub schedule: Option<DeliverySchedule>,
}
