use crate::models::DetailLevel;

pub(crate) const MAX_TOTAL_SUBJECTS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SelectionError {
    LimitReached { max: usize },
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::LimitReached { max } => write!(
                f,
                "Maximum reached: you can follow up to {max} topics. Remove one to add another."
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ManualTopicError {
    Empty,
    Duplicate,
    Selection(SelectionError),
}

impl std::fmt::Display for ManualTopicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManualTopicError::Empty => write!(f, "Please enter a topic."),
            ManualTopicError::Duplicate => write!(f, "Topic already added."),
            ManualTopicError::Selection(e) => write!(f, "{e}"),
        }
    }
}

impl From<SelectionError> for ManualTopicError {
    fn from(e: SelectionError) -> Self {
        ManualTopicError::Selection(e)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SelectionChange {
    Added,
    Removed,
}

/// Ordered topic names with a detail level at the same index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Selection {
    topics: Vec<String>,
    levels: Vec<DetailLevel>,
    max: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(MAX_TOTAL_SUBJECTS)
    }
}

impl Selection {
    pub fn new(max: usize) -> Self {
        Self {
            topics: vec![],
            levels: vec![],
            max,
        }
    }

    /// Rebuild from a saved profile. Extra entries beyond `max` are dropped and
    /// missing levels fall back to the default.
    pub fn restore(max: usize, topics: &[String], levels: &[DetailLevel]) -> Self {
        let mut s = Self::new(max);
        for (i, t) in topics.iter().enumerate() {
            if s.is_full() {
                break;
            }
            if t.trim().is_empty() || s.contains(t) {
                continue;
            }
            let level = levels.get(i).copied().unwrap_or_default();
            s.topics.push(t.clone());
            s.levels.push(level);
        }
        s
    }

    pub fn contains(&self, name: &str) -> bool {
        self.topics.iter().any(|t| t == name)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.topics.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[cfg(test)]
    pub fn levels(&self) -> &[DetailLevel] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DetailLevel)> + '_ {
        self.topics
            .iter()
            .map(|t| t.as_str())
            .zip(self.levels.iter().copied())
    }

    pub fn add(&mut self, name: &str) -> Result<(), SelectionError> {
        if self.is_full() {
            return Err(SelectionError::LimitReached { max: self.max });
        }
        self.topics.push(name.to_string());
        self.levels.push(DetailLevel::default());
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let Some(idx) = self.topics.iter().position(|t| t == name) else {
            return false;
        };
        self.topics.remove(idx);
        self.levels.remove(idx);
        true
    }

    pub fn toggle(&mut self, name: &str) -> Result<SelectionChange, SelectionError> {
        if self.remove(name) {
            return Ok(SelectionChange::Removed);
        }
        self.add(name).map(|_| SelectionChange::Added)
    }

    pub fn set_detail_level(&mut self, name: &str, level: DetailLevel) -> bool {
        match self.topics.iter().position(|t| t == name) {
            Some(idx) => {
                self.levels[idx] = level;
                true
            }
            None => false,
        }
    }

    pub fn detail_level(&self, name: &str) -> Option<DetailLevel> {
        let idx = self.topics.iter().position(|t| t == name)?;
        self.levels.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(s: &Selection) -> Vec<&str> {
        s.topics().iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_toggle_adds_with_default_level() {
        let mut s = Selection::default();
        assert_eq!(s.toggle("Sports"), Ok(SelectionChange::Added));
        assert_eq!(s.detail_level("Sports"), Some(DetailLevel::Standard));
    }

    #[test]
    fn test_toggle_removes_name_and_paired_level_preserving_order() {
        let mut s = Selection::default();
        for t in ["A", "B", "C", "D"] {
            s.add(t).expect("under limit");
        }
        s.set_detail_level("A", DetailLevel::Brief);
        s.set_detail_level("B", DetailLevel::InDepth);
        s.set_detail_level("D", DetailLevel::InDepth);

        assert_eq!(s.toggle("B"), Ok(SelectionChange::Removed));
        assert_eq!(names(&s), vec!["A", "C", "D"]);
        assert_eq!(
            s.levels(),
            &[DetailLevel::Brief, DetailLevel::Standard, DetailLevel::InDepth]
        );
    }

    #[test]
    fn test_limit_reached_leaves_selection_unchanged() {
        let mut s = Selection::new(3);
        for t in ["A", "B", "C"] {
            s.toggle(t).expect("under limit");
        }
        let before = s.clone();
        assert_eq!(s.toggle("D"), Err(SelectionError::LimitReached { max: 3 }));
        assert_eq!(s, before);
        assert!(SelectionError::LimitReached { max: 3 }
            .to_string()
            .contains("Maximum reached"));
    }

    #[test]
    fn test_restore_truncates_and_pads_levels() {
        let topics: Vec<String> = ["A", "B", "", "A", "C", "D"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let s = Selection::restore(3, &topics, &[DetailLevel::InDepth]);
        assert_eq!(names(&s), vec!["A", "B", "C"]);
        assert_eq!(
            s.levels(),
            &[DetailLevel::InDepth, DetailLevel::Standard, DetailLevel::Standard]
        );
    }

    #[test]
    fn test_set_detail_level_unknown_topic() {
        let mut s = Selection::default();
        assert!(!s.set_detail_level("Nope", DetailLevel::Brief));
    }
}
