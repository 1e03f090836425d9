use crate::api::ApiResult;
use crate::models::{DetailLevel, NodeId, TopicNode};
use crate::taxonomy::Taxonomy;
use crate::topics::registry::IdRegistry;
use crate::topics::selection::{ManualTopicError, Selection, SelectionChange, SelectionError};
use std::collections::{HashMap, HashSet};

pub(crate) const PATH_SEPARATOR: &str = " > ";

/// A subtopic lookup the caller must run against the suggestion service and
/// hand back through [`TopicTree::apply_fetch_result`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchRequest {
    pub node_id: NodeId,
    pub path: String,
}

/// State behind the topic grid.
///
/// Owns selection, expansion, the per-path subtopic cache and per-node
/// loading/error status, and derives the flat list of visible rows. All
/// mutation happens on one thread; fetch completions are applied to whatever
/// the state is when they arrive.
#[derive(Debug)]
pub(crate) struct TopicTree {
    taxonomy: Taxonomy,
    registry: IdRegistry,
    expanded: HashSet<NodeId>,

    /// path -> children. An empty list means "no children", not "unknown".
    cache: HashMap<String, Vec<String>>,

    selection: Selection,

    /// Nodes showing a spinner.
    loading: HashSet<NodeId>,
    /// Paths with an outstanding request. Survives collapse so a re-expand
    /// doesn't issue a duplicate fetch.
    in_flight: HashSet<String>,

    errors: HashMap<NodeId, String>,

    /// Transient validation message (selection limit, empty input).
    notice: Option<String>,

    display: Vec<TopicNode>,
}

fn flatten(
    registry: &mut IdRegistry,
    expanded: &HashSet<NodeId>,
    cache: &HashMap<String, Vec<String>>,
    node: TopicNode,
    out: &mut Vec<TopicNode>,
) {
    let children = if expanded.contains(&node.id) {
        cache.get(&node.path)
    } else {
        None
    };

    let parent = node.clone();
    out.push(node);

    let Some(children) = children else {
        return;
    };

    for name in children {
        let child = TopicNode {
            id: registry.id_for(&parent.path, name),
            name: name.clone(),
            depth: parent.depth + 1,
            parent_id: Some(parent.id),
            path: format!("{}{PATH_SEPARATOR}{}", parent.path, name),
        };
        flatten(registry, expanded, cache, child, out);
    }
}

impl TopicTree {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self::with_selection(taxonomy, Selection::default())
    }

    pub fn with_selection(taxonomy: Taxonomy, selection: Selection) -> Self {
        let mut tree = Self {
            taxonomy,
            registry: IdRegistry::default(),
            expanded: HashSet::new(),
            cache: HashMap::new(),
            selection,
            loading: HashSet::new(),
            in_flight: HashSet::new(),
            errors: HashMap::new(),
            notice: None,
            display: vec![],
        };
        tree.rebuild_display_list();
        tree
    }

    pub fn display_list(&self) -> &[TopicNode] {
        &self.display
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn is_loading(&self, id: NodeId) -> bool {
        self.loading.contains(&id)
    }

    pub fn error_for(&self, id: NodeId) -> Option<&str> {
        self.errors.get(&id).map(|s| s.as_str())
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    #[cfg(test)]
    pub fn cached_children(&self, path: &str) -> Option<&[String]> {
        self.cache.get(path).map(|v| v.as_slice())
    }

    /// Recompute the visible rows: roots sorted by name, then a depth-first walk
    /// that only descends into nodes that are expanded and cached.
    pub fn rebuild_display_list(&mut self) {
        let mut roots = self.taxonomy.roots().to_vec();
        roots.sort();

        let mut out: Vec<TopicNode> = Vec::with_capacity(self.display.len().max(roots.len()));
        for name in roots {
            let root = TopicNode {
                id: self.registry.id_for("", &name),
                path: name.clone(),
                name,
                depth: 0,
                parent_id: None,
            };
            flatten(
                &mut self.registry,
                &self.expanded,
                &self.cache,
                root,
                &mut out,
            );
        }

        self.display = out;
    }

    fn static_children(&self, node: &TopicNode) -> Option<Vec<String>> {
        let children = match node.depth {
            0 => self.taxonomy.root_children(&node.name),
            1 => self.taxonomy.branch_children(&node.name),
            _ => None,
        };
        children.map(|c| c.to_vec())
    }

    /// A tap toggles expansion and selection together.
    ///
    /// Returns a request when the node's children have to come from the
    /// suggestion service.
    pub fn handle_tap(&mut self, node: &TopicNode) -> Option<FetchRequest> {
        self.errors.remove(&node.id);

        let mut request = None;
        if self.expanded.remove(&node.id) {
            // The request (if any) keeps running; its result still lands in the cache.
            self.loading.remove(&node.id);
            log::debug!("collapsed {:?}", node.path);
        } else {
            self.expanded.insert(node.id);
            if !self.cache.contains_key(&node.path) {
                if let Some(children) = self.static_children(node) {
                    self.cache.insert(node.path.clone(), children);
                } else if self.in_flight.contains(&node.path) {
                    self.loading.insert(node.id);
                } else {
                    self.in_flight.insert(node.path.clone());
                    self.loading.insert(node.id);
                    log::debug!("fetching subtopics for {:?}", node.path);
                    request = Some(FetchRequest {
                        node_id: node.id,
                        path: node.path.clone(),
                    });
                }
            }
        }

        let _ = self.toggle_selection(&node.name);
        self.rebuild_display_list();
        request
    }

    /// Apply a finished subtopic lookup.
    ///
    /// Failures still cache an empty list so re-expanding doesn't retry.
    pub fn apply_fetch_result(&mut self, request: &FetchRequest, result: ApiResult<Vec<String>>) {
        self.in_flight.remove(&request.path);
        self.loading.remove(&request.node_id);

        match result {
            Ok(children) => {
                // Repeated names would map to one registry id and share a row identity.
                let mut seen = HashSet::new();
                let children: Vec<String> =
                    children.into_iter().filter(|c| seen.insert(c.clone())).collect();
                self.errors.remove(&request.node_id);
                self.cache.insert(request.path.clone(), children);
            }
            Err(e) => {
                log::warn!("subtopic fetch for {:?} failed: {e}", request.path);
                self.errors.insert(request.node_id, e.user_message());
                self.cache.insert(request.path.clone(), vec![]);
            }
        }

        self.rebuild_display_list();
    }

    pub fn toggle_selection(&mut self, name: &str) -> Result<SelectionChange, SelectionError> {
        self.notice = None;
        let res = self.selection.toggle(name);
        if let Err(e) = &res {
            self.notice = Some(e.to_string());
        }
        res
    }

    /// Add a free-form topic typed by the user.
    pub fn add_manual_topic(&mut self, input: &str) -> Result<(), ManualTopicError> {
        self.notice = None;
        let res = self.try_add_manual_topic(input.trim());
        if let Err(e) = &res {
            self.notice = Some(e.to_string());
        }
        res
    }

    fn try_add_manual_topic(&mut self, topic: &str) -> Result<(), ManualTopicError> {
        if topic.is_empty() {
            return Err(ManualTopicError::Empty);
        }
        if self.selection.contains(topic) {
            return Err(ManualTopicError::Duplicate);
        }
        self.selection.add(topic)?;
        Ok(())
    }

    pub fn set_detail_level(&mut self, name: &str, level: DetailLevel) -> bool {
        self.selection.set_detail_level(name, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::SavedProfile;
    use crate::topics::selection::MAX_TOTAL_SUBJECTS;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn taxonomy() -> Taxonomy {
        let mut depth0 = HashMap::new();
        depth0.insert("Technology".to_string(), strings(&["Mobile", "Gadgets"]));
        depth0.insert("Sports".to_string(), strings(&["Football", "Tennis"]));
        let mut depth1 = HashMap::new();
        depth1.insert(
            "Football".to_string(),
            strings(&["Premier League", "La Liga"]),
        );
        Taxonomy::new(
            strings(&["Technology", "Sports", "Science", "Culture"]),
            depth0,
            depth1,
        )
    }

    fn names(tree: &TopicTree) -> Vec<&str> {
        tree.display_list().iter().map(|n| n.name.as_str()).collect()
    }

    fn node(tree: &TopicTree, name: &str) -> TopicNode {
        tree.display_list()
            .iter()
            .find(|n| n.name == name)
            .cloned()
            .expect("node should be visible")
    }

    fn ids(tree: &TopicTree) -> Vec<(String, NodeId)> {
        tree.display_list()
            .iter()
            .map(|n| (n.path.clone(), n.id))
            .collect()
    }

    #[test]
    fn test_roots_are_sorted_and_collapsed() {
        let tree = TopicTree::new(taxonomy());
        assert_eq!(names(&tree), vec!["Culture", "Science", "Sports", "Technology"]);
        assert!(tree.display_list().iter().all(|n| n.depth == 0));
        assert!(tree.display_list().iter().all(|n| n.parent_id.is_none()));
    }

    #[test]
    fn test_tap_static_root_expands_without_fetch() {
        let mut tree = TopicTree::new(taxonomy());
        let tech = node(&tree, "Technology");

        assert_eq!(tree.handle_tap(&tech), None);
        tree.rebuild_display_list();

        let list = tree.display_list();
        let pos = list
            .iter()
            .position(|n| n.name == "Technology")
            .expect("technology should be visible");
        let seq: Vec<&str> = list[pos..pos + 3].iter().map(|n| n.name.as_str()).collect();
        assert_eq!(seq, vec!["Technology", "Mobile", "Gadgets"]);
        assert_eq!(list[pos + 1].path, "Technology > Mobile");
        assert_eq!(list[pos + 1].depth, 1);
        assert_eq!(list[pos + 1].parent_id, Some(tech.id));
        assert!(tree.is_selected("Technology"));
    }

    #[test]
    fn test_first_level_uses_depth1_dictionary() {
        let mut tree = TopicTree::new(taxonomy());
        let sports = node(&tree, "Sports");
        assert_eq!(tree.handle_tap(&sports), None);
        let football = node(&tree, "Football");
        assert_eq!(tree.handle_tap(&football), None);

        assert_eq!(
            tree.cached_children("Sports > Football"),
            Some(strings(&["Premier League", "La Liga"]).as_slice())
        );
        let pl = node(&tree, "Premier League");
        assert_eq!(pl.depth, 2);
        assert_eq!(pl.path, "Sports > Football > Premier League");
    }

    #[test]
    fn test_rebuild_twice_keeps_ids() {
        let mut tree = TopicTree::new(taxonomy());
        let sports = node(&tree, "Sports");
        tree.handle_tap(&sports);
        let football = node(&tree, "Football");
        tree.handle_tap(&football);

        let first = ids(&tree);
        tree.rebuild_display_list();
        assert_eq!(ids(&tree), first);
    }

    #[test]
    fn test_collapse_then_reexpand_restores_same_subtree() {
        let mut tree = TopicTree::new(taxonomy());
        let sports = node(&tree, "Sports");
        tree.handle_tap(&sports);
        let expanded = ids(&tree);

        tree.handle_tap(&sports);
        assert!(!tree.is_expanded(sports.id));
        assert_eq!(names(&tree), vec!["Culture", "Science", "Sports", "Technology"]);

        assert_eq!(tree.handle_tap(&sports), None);
        assert_eq!(ids(&tree), expanded);
    }

    #[test]
    fn test_collapsed_branch_descendants_are_omitted() {
        let mut tree = TopicTree::new(taxonomy());
        let sports = node(&tree, "Sports");
        tree.handle_tap(&sports);
        let football = node(&tree, "Football");
        tree.handle_tap(&football);
        assert!(names(&tree).contains(&"La Liga"));

        // Collapsing the root hides grandchildren even though Football stays expanded.
        tree.handle_tap(&sports);
        assert!(tree.is_expanded(football.id));
        assert!(!names(&tree).contains(&"Football"));
        assert!(!names(&tree).contains(&"La Liga"));
    }

    #[test]
    fn test_remote_root_issues_single_fetch_keyed_by_path() {
        let mut tree = TopicTree::new(taxonomy());
        let science = node(&tree, "Science");

        let req = tree.handle_tap(&science).expect("should request subtopics");
        assert_eq!(req.path, "Science");
        assert_eq!(req.node_id, science.id);
        assert!(tree.is_loading(science.id));

        tree.apply_fetch_result(&req, Ok(vec![]));
        assert!(!tree.is_loading(science.id));
        assert_eq!(tree.cached_children("Science"), Some(&[][..]));
        assert!(tree.error_for(science.id).is_none());
        assert_eq!(names(&tree), vec!["Culture", "Science", "Sports", "Technology"]);

        // Cached: collapse + expand never fetches again.
        assert_eq!(tree.handle_tap(&science), None);
        assert_eq!(tree.handle_tap(&science), None);
    }

    #[test]
    fn test_remote_children_are_shown_in_response_order() {
        let mut tree = TopicTree::new(taxonomy());
        let science = node(&tree, "Science");
        let req = tree.handle_tap(&science).expect("should request subtopics");
        tree.apply_fetch_result(&req, Ok(strings(&["Space", "Biology"])));

        assert_eq!(
            names(&tree),
            vec!["Culture", "Science", "Space", "Biology", "Sports", "Technology"]
        );
    }

    #[test]
    fn test_application_error_caches_empty_and_sets_message() {
        let mut tree = TopicTree::new(taxonomy());
        let culture = node(&tree, "Culture");
        let req = tree.handle_tap(&culture).expect("should request subtopics");

        tree.apply_fetch_result(&req, Err(ApiError::application("rate limited")));

        assert_eq!(tree.cached_children("Culture"), Some(&[][..]));
        let msg = tree.error_for(culture.id).expect("error should be set");
        assert!(msg.contains("rate limited"));
        assert!(!tree.is_loading(culture.id));
    }

    #[test]
    fn test_transport_and_server_errors_cache_empty() {
        let mut tree = TopicTree::new(taxonomy());
        let culture = node(&tree, "Culture");
        let science = node(&tree, "Science");
        let r1 = tree.handle_tap(&culture).expect("should request subtopics");
        let r2 = tree.handle_tap(&science).expect("should request subtopics");

        tree.apply_fetch_result(&r1, Err(ApiError::http(500, "boom".to_string(), "ctx")));
        tree.apply_fetch_result(&r2, Err(ApiError::parse("bad json")));

        assert_eq!(tree.cached_children("Culture"), Some(&[][..]));
        assert_eq!(tree.cached_children("Science"), Some(&[][..]));
        assert!(tree.error_for(culture.id).is_some_and(|m| m.contains("500")));
        assert!(tree.error_for(science.id).is_some());
    }

    #[test]
    fn test_error_cleared_on_next_tap() {
        let mut tree = TopicTree::new(taxonomy());
        let culture = node(&tree, "Culture");
        let req = tree.handle_tap(&culture).expect("should request subtopics");
        tree.apply_fetch_result(&req, Err(ApiError::application("rate limited")));
        assert!(tree.error_for(culture.id).is_some());

        tree.handle_tap(&culture);
        assert!(tree.error_for(culture.id).is_none());
    }

    #[test]
    fn test_concurrent_fetches_keep_independent_loading_state() {
        let mut tree = TopicTree::new(taxonomy());
        let science = node(&tree, "Science");
        let culture = node(&tree, "Culture");

        let slow = tree.handle_tap(&science).expect("should request subtopics");
        let fast = tree.handle_tap(&culture).expect("should request subtopics");
        assert!(tree.is_loading(science.id));
        assert!(tree.is_loading(culture.id));

        // Second request resolves first; the first node keeps its spinner.
        tree.apply_fetch_result(&fast, Ok(strings(&["Film"])));
        assert!(!tree.is_loading(culture.id));
        assert!(tree.is_loading(science.id));
        assert!(names(&tree).contains(&"Film"));

        tree.apply_fetch_result(&slow, Ok(strings(&["Space"])));
        assert!(!tree.is_loading(science.id));
        assert!(names(&tree).contains(&"Space"));
    }

    #[test]
    fn test_repeated_remote_names_keep_rows_unique() {
        let mut tree = TopicTree::new(taxonomy());
        let science = node(&tree, "Science");
        let req = tree.handle_tap(&science).expect("should request subtopics");
        tree.apply_fetch_result(&req, Ok(strings(&["Space", "Biology", "Space"])));

        assert_eq!(
            tree.cached_children("Science"),
            Some(strings(&["Space", "Biology"]).as_slice())
        );
        let ids: HashSet<NodeId> = tree.display_list().iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), tree.display_list().len());
    }

    #[test]
    fn test_late_result_after_collapse_populates_cache_silently() {
        let mut tree = TopicTree::new(taxonomy());
        let science = node(&tree, "Science");
        let req = tree.handle_tap(&science).expect("should request subtopics");

        tree.handle_tap(&science);
        assert!(!tree.is_loading(science.id));

        tree.apply_fetch_result(&req, Ok(strings(&["Space"])));
        assert!(!names(&tree).contains(&"Space"));
        assert_eq!(tree.cached_children("Science"), Some(strings(&["Space"]).as_slice()));

        assert_eq!(tree.handle_tap(&science), None);
        assert!(names(&tree).contains(&"Space"));
    }

    #[test]
    fn test_reexpand_while_in_flight_does_not_refetch() {
        let mut tree = TopicTree::new(taxonomy());
        let science = node(&tree, "Science");
        let req = tree.handle_tap(&science).expect("should request subtopics");
        tree.handle_tap(&science);

        assert_eq!(tree.handle_tap(&science), None);
        assert!(tree.is_loading(science.id));

        tree.apply_fetch_result(&req, Ok(strings(&["Space"])));
        assert!(names(&tree).contains(&"Space"));
    }

    #[test]
    fn test_tap_toggles_selection_with_expansion() {
        let mut tree = TopicTree::new(taxonomy());
        let tech = node(&tree, "Technology");
        tree.handle_tap(&tech);
        assert!(tree.is_selected("Technology"));
        tree.handle_tap(&tech);
        assert!(!tree.is_selected("Technology"));
    }

    #[test]
    fn test_selection_limit_sets_notice_without_change() {
        let mut tree = TopicTree::new(taxonomy());
        for i in 0..MAX_TOTAL_SUBJECTS {
            tree.toggle_selection(&format!("Topic {i}"))
                .expect("under limit");
        }
        let before = tree.selection().clone();

        let err = tree.toggle_selection("One more").expect_err("should hit limit");
        assert_eq!(err, SelectionError::LimitReached { max: MAX_TOTAL_SUBJECTS });
        assert_eq!(tree.selection(), &before);
        assert!(tree.notice().is_some_and(|m| m.contains("Maximum reached")));
    }

    #[test]
    fn test_tap_at_limit_still_expands() {
        let mut tree = TopicTree::new(taxonomy());
        for i in 0..MAX_TOTAL_SUBJECTS {
            tree.toggle_selection(&format!("Topic {i}"))
                .expect("under limit");
        }
        let tech = node(&tree, "Technology");
        tree.handle_tap(&tech);
        assert!(tree.is_expanded(tech.id));
        assert!(!tree.is_selected("Technology"));
        assert!(tree.notice().is_some());
    }

    #[test]
    fn test_manual_topic_validation() {
        let mut tree = TopicTree::new(taxonomy());
        assert_eq!(tree.add_manual_topic("   "), Err(ManualTopicError::Empty));
        assert_eq!(tree.notice(), Some("Please enter a topic."));
        assert!(tree.selection().is_empty());

        tree.add_manual_topic("  Fusion energy ")
            .expect("should add");
        assert!(tree.is_selected("Fusion energy"));
        assert!(tree.notice().is_none());

        assert_eq!(
            tree.add_manual_topic("Fusion energy"),
            Err(ManualTopicError::Duplicate)
        );
    }

    #[test]
    fn test_restored_selection_starts_with_collapsed_tree() {
        let profile = SavedProfile {
            topics: strings(&["Sports", "Quantum computing"]),
            detail_levels: vec![DetailLevel::InDepth, DetailLevel::Brief],
            ..Default::default()
        };
        let selection =
            Selection::restore(MAX_TOTAL_SUBJECTS, &profile.topics, &profile.detail_levels);
        let tree = TopicTree::with_selection(taxonomy(), selection);
        assert!(tree.is_selected("Sports"));
        assert_eq!(
            tree.selection().detail_level("Quantum computing"),
            Some(DetailLevel::Brief)
        );
        assert_eq!(names(&tree), vec!["Culture", "Science", "Sports", "Technology"]);
        assert!(tree.cached_children("Sports").is_none());
    }
}
