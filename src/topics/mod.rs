mod registry;
mod selection;
mod tree;

pub(crate) use selection::{Selection, MAX_TOTAL_SUBJECTS};
pub(crate) use tree::{FetchRequest, TopicTree};
