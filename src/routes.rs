//! Declarative page table for the site.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSection {
    Overview,
    GettingStarted,
    Commands,
    Settings,
    TextToSpeech,
}

impl DocSection {
    pub const ALL: [DocSection; 5] = [
        DocSection::Overview,
        DocSection::GettingStarted,
        DocSection::Commands,
        DocSection::Settings,
        DocSection::TextToSpeech,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            DocSection::Overview => "overview",
            DocSection::GettingStarted => "getting-started",
            DocSection::Commands => "commands",
            DocSection::Settings => "settings",
            DocSection::TextToSpeech => "text-to-speech",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DocSection::Overview => "Overview",
            DocSection::GettingStarted => "Getting started",
            DocSection::Commands => "Commands",
            DocSection::Settings => "Settings",
            DocSection::TextToSpeech => "Text-to-speech",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Statistics,
    Documentation(DocSection),
}

impl Page {
    pub fn path(self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Statistics => "/statistics".to_string(),
            Page::Documentation(DocSection::Overview) => "/documentation".to_string(),
            Page::Documentation(section) => format!("/documentation/{}", section.slug()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Target {
    Page(Page),
    /// Resolved against the captured trailing segment.
    DocSection,
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// axum path pattern.
    pub path: &'static str,
    pub name: &'static str,
    pub target: Target,
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: "Home",
        target: Target::Page(Page::Home),
    },
    Route {
        path: "/statistics",
        name: "Statistics",
        target: Target::Page(Page::Statistics),
    },
    Route {
        path: "/documentation",
        name: "Documentation",
        target: Target::Page(Page::Documentation(DocSection::Overview)),
    },
    Route {
        path: "/documentation/:section",
        name: "Documentation",
        target: Target::DocSection,
    },
];

/// Top-level navigation entries, in display order.
pub fn nav() -> impl Iterator<Item = (&'static str, Page)> {
    ROUTES.iter().filter_map(|route| match route.target {
        Target::Page(page) => Some((route.name, page)),
        Target::DocSection => None,
    })
}

/// Resolves a request path to the single page that serves it.
pub fn resolve(path: &str) -> Option<Page> {
    ROUTES.iter().find_map(|route| match route.target {
        Target::Page(page) if route.path == path => Some(page),
        Target::Page(_) => None,
        Target::DocSection => {
            let prefix = route.path.trim_end_matches(":section");
            let slug = path.strip_prefix(prefix)?;
            if slug.contains('/') {
                return None;
            }
            DocSection::from_slug(slug).map(Page::Documentation)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_top_level_pages() {
        assert_eq!(resolve("/"), Some(Page::Home));
        assert_eq!(resolve("/statistics"), Some(Page::Statistics));
        assert_eq!(resolve("/documentation"), Some(Page::Documentation(DocSection::Overview)));
    }

    #[test]
    fn nested_documentation_paths_resolve_to_sections() {
        for section in DocSection::ALL {
            let path = format!("/documentation/{}", section.slug());
            assert_eq!(resolve(&path), Some(Page::Documentation(section)), "{path}");
        }
    }

    #[test]
    fn unknown_paths_resolve_to_nothing() {
        assert_eq!(resolve("/pricing"), None);
        assert_eq!(resolve("/documentation/unknown"), None);
        assert_eq!(resolve("/documentation/commands/extra"), None);
        assert_eq!(resolve("/statisticsx"), None);
    }

    #[test]
    fn trailing_slashes_are_not_registered_paths() {
        assert_eq!(resolve("/statistics/"), None);
        assert_eq!(resolve("/documentation/"), None);
        assert_eq!(resolve("/documentation/commands/"), None);
        for route in ROUTES {
            assert!(route.path == "/" || !route.path.ends_with('/'), "{}", route.path);
        }
    }

    #[test]
    fn page_paths_round_trip() {
        let pages = [Page::Home, Page::Statistics]
            .into_iter()
            .chain(DocSection::ALL.into_iter().map(Page::Documentation));
        for page in pages {
            assert_eq!(resolve(&page.path()), Some(page));
        }
    }

    #[test]
    fn nav_lists_each_top_level_page_once() {
        let names: Vec<&str> = nav().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Home", "Statistics", "Documentation"]);
    }
}
