//! Navigation menu and page selection.

use crate::page::{films_page, overview_page, tags_page, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub page: Page,
    pub title: &'static str,
    pub icon: &'static str,
}

impl NavigationEntry {
    pub fn href(&self) -> String {
        format!("/pages/{}", self.page.slug)
    }
}

#[derive(Debug, Clone)]
pub struct NavigationShell {
    entries: Vec<NavigationEntry>,
}

impl NavigationShell {
    fn new(entries: Vec<NavigationEntry>) -> Self {
        Self { entries }
    }

    /// The three MovieLens pages, in menu order.
    pub fn movielens() -> Self {
        Self::new(vec![
            NavigationEntry {
                page: overview_page(),
                title: "Vue d'ensemble",
                icon: "📊",
            },
            NavigationEntry {
                page: tags_page(),
                title: "Analyse des tags",
                icon: "🏷️",
            },
            NavigationEntry {
                page: films_page(),
                title: "Exploration des films",
                icon: "🎬",
            },
        ])
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn select(&self, slug: &str) -> Option<&NavigationEntry> {
        self.entries.iter().find(|e| e.page.slug == slug)
    }

    pub fn default_entry(&self) -> Option<&NavigationEntry> {
        self.entries.first()
    }

    /// Distinct artifact names referenced by any page, in first-seen order.
    pub fn artifacts(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for name in self.entries.iter().flat_map(|e| e.page.artifacts()) {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

/// What a session has on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Idle,
    Viewing(&'static str),
}

impl Session {
    /// Moves to `slug` if the shell knows it; returns the previous page.
    pub fn select(
        &mut self,
        shell: &NavigationShell,
        slug: &str,
    ) -> Option<Option<&'static str>> {
        let entry = shell.select(slug)?;
        let previous = match std::mem::replace(self, Session::Viewing(entry.page.slug)) {
            Session::Idle => None,
            Session::Viewing(prev) => Some(prev),
        };
        Some(previous)
    }

    pub fn current(&self) -> Option<&'static str> {
        match self {
            Session::Idle => None,
            Session::Viewing(slug) => Some(*slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_order_is_declaration_order() {
        let shell = NavigationShell::movielens();
        let titles: Vec<_> = shell.entries().iter().map(|e| e.title).collect();
        assert_eq!(
            titles,
            vec!["Vue d'ensemble", "Analyse des tags", "Exploration des films"]
        );
        assert_eq!(shell.default_entry().unwrap().page.slug, "vue-ensemble");
    }

    #[test]
    fn select_by_slug() {
        let shell = NavigationShell::movielens();
        assert_eq!(shell.select("films").unwrap().title, "Exploration des films");
        assert_eq!(shell.select("tags").unwrap().href(), "/pages/tags");
        assert!(shell.select("nope").is_none());
    }

    #[test]
    fn artifacts_are_deduplicated() {
        let shell = NavigationShell::movielens();
        assert_eq!(
            shell.artifacts(),
            vec!["genre_counts", "movies_by_year", "top_movies_by_ratings", "top_tags"]
        );
    }

    #[test]
    fn session_transitions() {
        let shell = NavigationShell::movielens();
        let mut session = Session::default();
        assert_eq!(session.current(), None);

        assert_eq!(session.select(&shell, "tags"), Some(None));
        assert_eq!(session, Session::Viewing("tags"));

        assert_eq!(session.select(&shell, "films"), Some(Some("tags")));
        assert_eq!(session.current(), Some("films"));

        // unknown page leaves the session untouched
        assert_eq!(session.select(&shell, "missing"), None);
        assert_eq!(session.current(), Some("films"));
    }
}
