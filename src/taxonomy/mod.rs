use std::collections::HashMap;

/// Which taxonomy variant applies to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub(crate) enum Locale {
    Us,
    #[default]
    International,
}

impl Locale {
    /// Map a BCP-47-ish tag (`en-US`, `en_us`, `fr-FR`) to a variant.
    pub fn parse(tag: &str) -> Self {
        let region = tag
            .trim()
            .split(['-', '_'])
            .nth(1)
            .unwrap_or_default();
        if region.eq_ignore_ascii_case("us") {
            Locale::Us
        } else {
            Locale::International
        }
    }
}

#[derive(Clone, Copy)]
enum Scope {
    All,
    Only(Locale),
}

impl Scope {
    fn includes(self, locale: Locale) -> bool {
        match self {
            Scope::All => true,
            Scope::Only(l) => l == locale,
        }
    }
}

struct Row {
    scope: Scope,
    name: &'static str,
    /// `None` means the children come from the remote suggestion service.
    children: Option<&'static [&'static str]>,
}

const fn row(scope: Scope, name: &'static str, children: &'static [&'static str]) -> Row {
    Row {
        scope,
        name,
        children: Some(children),
    }
}

const fn remote(scope: Scope, name: &'static str) -> Row {
    Row {
        scope,
        name,
        children: None,
    }
}

// Roots and their depth-0 children. A name may appear once per locale.
const ROOTS: &[Row] = &[
    row(
        Scope::All,
        "Business",
        &["Markets", "Startups", "Economy", "Personal Finance"],
    ),
    row(Scope::All, "Technology", &["AI", "Mobile", "Gadgets", "Cybersecurity"]),
    row(
        Scope::Only(Locale::Us),
        "Politics",
        &["Congress", "White House", "Supreme Court", "Elections"],
    ),
    row(
        Scope::Only(Locale::International),
        "Politics",
        &["Europe", "Asia", "Elections", "Diplomacy"],
    ),
    row(
        Scope::Only(Locale::Us),
        "Sports",
        &["NFL", "NBA", "MLB", "NHL", "College Sports"],
    ),
    row(
        Scope::Only(Locale::International),
        "Sports",
        &["Football", "Cricket", "Rugby", "Formula 1", "Tennis"],
    ),
    remote(Scope::All, "Science"),
    remote(Scope::All, "Health"),
    remote(Scope::All, "Culture"),
    remote(Scope::Only(Locale::Us), "Local News"),
    remote(Scope::Only(Locale::International), "World"),
];

// Depth-1 children, keyed by the first-level subtopic name.
const BRANCHES: &[Row] = &[
    row(
        Scope::Only(Locale::International),
        "Football",
        &["Premier League", "La Liga", "Serie A", "Champions League"],
    ),
    row(Scope::Only(Locale::Us), "NFL", &["AFC", "NFC", "Fantasy Football"]),
    row(Scope::Only(Locale::Us), "NBA", &["Eastern Conference", "Western Conference"]),
    row(Scope::All, "Markets", &["Stocks", "Bonds", "Commodities", "Crypto"]),
    row(Scope::All, "AI", &["Research", "Policy", "Products"]),
    row(Scope::Only(Locale::Us), "Elections", &["Presidential", "Midterms", "State Races"]),
];

/// Static topic dictionaries for one locale.
#[derive(Clone, Debug, Default)]
pub(crate) struct Taxonomy {
    roots: Vec<String>,
    depth0: HashMap<String, Vec<String>>,
    depth1: HashMap<String, Vec<String>>,
}

fn collect(rows: &[Row], locale: Locale) -> (Vec<String>, HashMap<String, Vec<String>>) {
    let mut names: Vec<String> = vec![];
    let mut children: HashMap<String, Vec<String>> = HashMap::new();

    for r in rows.iter().filter(|r| r.scope.includes(locale)) {
        if !names.iter().any(|n| n == r.name) {
            names.push(r.name.to_string());
        }
        if let Some(c) = r.children {
            children.insert(
                r.name.to_string(),
                c.iter().map(|s| s.to_string()).collect(),
            );
        }
    }

    (names, children)
}

impl Taxonomy {
    pub fn new(
        roots: Vec<String>,
        depth0: HashMap<String, Vec<String>>,
        depth1: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            roots,
            depth0,
            depth1,
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        let (roots, depth0) = collect(ROOTS, locale);
        let (_, depth1) = collect(BRANCHES, locale);
        Self::new(roots, depth0, depth1)
    }

    /// Root category names, in table order (callers sort).
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn root_children(&self, root: &str) -> Option<&[String]> {
        self.depth0.get(root).map(|v| v.as_slice())
    }

    pub fn branch_children(&self, first_level: &str) -> Option<&[String]> {
        self.depth1.get(first_level).map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("en-US"), Locale::Us);
        assert_eq!(Locale::parse("en_us"), Locale::Us);
        assert_eq!(Locale::parse("en-GB"), Locale::International);
        assert_eq!(Locale::parse("fr"), Locale::International);
        assert_eq!(Locale::parse(""), Locale::International);
    }

    #[test]
    fn test_us_variant_has_us_sports() {
        let t = Taxonomy::for_locale(Locale::Us);
        let sports = t.root_children("Sports").expect("sports should be static");
        assert!(sports.contains(&"NFL".to_string()));
        assert!(!sports.contains(&"Cricket".to_string()));
        assert!(t.roots().contains(&"Local News".to_string()));
        assert!(!t.roots().contains(&"World".to_string()));
    }

    #[test]
    fn test_international_variant_has_football_branch() {
        let t = Taxonomy::for_locale(Locale::International);
        let football = t
            .branch_children("Football")
            .expect("football should have static children");
        assert_eq!(football[0], "Premier League");
        assert!(t.branch_children("NFL").is_none());
        assert!(t.roots().contains(&"World".to_string()));
    }

    #[test]
    fn test_shared_rows_appear_in_both_variants_once() {
        for locale in [Locale::Us, Locale::International] {
            let t = Taxonomy::for_locale(locale);
            let n = t.roots().iter().filter(|r| *r == "Politics").count();
            assert_eq!(n, 1);
            assert_eq!(
                t.root_children("Technology").map(|c| c.len()),
                Some(4)
            );
        }
    }

    #[test]
    fn test_remote_roots_have_no_static_children() {
        let t = Taxonomy::for_locale(Locale::Us);
        assert!(t.roots().contains(&"Science".to_string()));
        assert!(t.root_children("Science").is_none());
    }
}
