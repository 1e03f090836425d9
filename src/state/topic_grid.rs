use crate::models::{DetailLevel, TopicNode};
use crate::state::AppContext;
use crate::taxonomy::Taxonomy;
use crate::topics::{FetchRequest, TopicTree};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Wires a [`TopicTree`] to the topics screen.
///
/// Created once per presentation, so expansion and the subtopic cache start
/// empty every time; only the selection is seeded from app state.
#[derive(Clone, Copy)]
pub(crate) struct TopicGridController {
    app_state: StoredValue<AppContext>,
    tree: RwSignal<TopicTree>,
}

impl TopicGridController {
    pub fn new(app_state: AppContext) -> Self {
        let taxonomy = Taxonomy::for_locale(app_state.0.locale);
        let selection = app_state.0.selection.get_untracked();
        let tree = RwSignal::new(TopicTree::with_selection(taxonomy, selection));

        Self {
            app_state: StoredValue::new(app_state),
            tree,
        }
    }

    pub fn tree(&self) -> RwSignal<TopicTree> {
        self.tree
    }

    pub fn on_tap(&self, node: TopicNode) {
        let request = self.tree.try_update(|t| t.handle_tap(&node)).flatten();
        self.sync_selection();

        if let Some(req) = request {
            self.spawn_fetch(req);
        }
    }

    fn spawn_fetch(&self, req: FetchRequest) {
        let api_client = self
            .app_state
            .with_value(|s| s.0.api_client.get_untracked());
        let tree = self.tree;

        spawn_local(async move {
            let result = api_client.fetch_subtopics(&req.path).await;
            // The screen may be gone by now; a disposed signal just drops the result.
            if tree
                .try_update(|t| t.apply_fetch_result(&req, result))
                .is_none()
            {
                log::debug!("topic grid closed before {:?} resolved", req.path);
            }
        });
    }

    pub fn on_toggle_selection(&self, name: &str) {
        self.tree.update(|t| {
            let _ = t.toggle_selection(name);
        });
        self.sync_selection();
    }

    /// Returns true when the topic was added (so the caller can clear its input).
    pub fn on_add_manual_topic(&self, input: &str) -> bool {
        let added = self
            .tree
            .try_update(|t| t.add_manual_topic(input).is_ok())
            .unwrap_or(false);
        self.sync_selection();
        added
    }

    pub fn on_detail_level(&self, name: &str, level: DetailLevel) {
        self.tree.update(|t| {
            t.set_detail_level(name, level);
        });
        self.sync_selection();
    }

    pub fn dismiss_notice(&self) {
        self.tree.update(|t| t.dismiss_notice());
    }

    fn sync_selection(&self) {
        let Some(selection) = self.tree.try_with_untracked(|t| t.selection().clone()) else {
            return;
        };
        self.app_state.with_value(|s| s.0.selection.set(selection));
    }
}
