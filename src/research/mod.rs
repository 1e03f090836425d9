pub(crate) const MAX_RESEARCH_TOPICS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ResearchError {
    Empty,
    Duplicate,
    LimitReached { max: usize },
}

impl std::fmt::Display for ResearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResearchError::Empty => write!(f, "Please enter a topic."),
            ResearchError::Duplicate => write!(f, "You're already researching that."),
            ResearchError::LimitReached { max } => write!(
                f,
                "Maximum reached: you can keep up to {max} research topics."
            ),
        }
    }
}

/// Free-form research prompts ("effects of rate cuts on housing").
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResearchTopics {
    items: Vec<String>,
    max: usize,
}

impl Default for ResearchTopics {
    fn default() -> Self {
        Self::new(MAX_RESEARCH_TOPICS)
    }
}

impl ResearchTopics {
    pub fn new(max: usize) -> Self {
        Self { items: vec![], max }
    }

    pub fn restore(max: usize, saved: &[String]) -> Self {
        let mut r = Self::new(max);
        for s in saved {
            let _ = r.add(s);
        }
        r
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn add(&mut self, input: &str) -> Result<(), ResearchError> {
        let topic = input.trim();
        if topic.is_empty() {
            return Err(ResearchError::Empty);
        }
        // Case-insensitive so "AI chips" and "ai chips" don't both go in.
        if self.items.iter().any(|t| t.eq_ignore_ascii_case(topic)) {
            return Err(ResearchError::Duplicate);
        }
        if self.items.len() >= self.max {
            return Err(ResearchError::LimitReached { max: self.max });
        }
        self.items.push(topic.to_string());
        Ok(())
    }

    pub fn remove(&mut self, topic: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t != topic);
        self.items.len() != before
    }
}
