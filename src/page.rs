//! Page layouts as data.
//!
//! A page is an ordered list of sections; each section names the artifact it
//! embeds, the height of the embed, and the notice shown when it is missing.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: &'static str,
    pub artifact: &'static str,
    pub height: u32,
    pub missing_notice: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub slug: &'static str,
    pub heading: &'static str,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn artifacts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.artifact)
    }
}

const GENRES: Section = Section {
    header: "1. Distribution des genres",
    artifact: "genre_counts",
    height: 600,
    missing_notice: "Graphique des genres non trouvé",
};

const YEARS: Section = Section {
    header: "2. Films par année",
    artifact: "movies_by_year",
    height: 600,
    missing_notice: "Graphique des années non trouvé",
};

const TOP_MOVIES: Section = Section {
    header: "3. Top 20 des films par nombre d'évaluations",
    artifact: "top_movies_by_ratings",
    height: 800,
    missing_notice: "Graphique des films non trouvé",
};

const TOP_TAGS: Section = Section {
    header: "4. Top tags les plus utilisés",
    artifact: "top_tags",
    height: 600,
    missing_notice: "Graphique des tags non trouvé",
};

const fn numbered(section: Section, header: &'static str) -> Section {
    Section {
        header,
        artifact: section.artifact,
        height: section.height,
        missing_notice: section.missing_notice,
    }
}

pub fn overview_page() -> Page {
    Page {
        slug: "vue-ensemble",
        heading: "Analyse générale des films et évaluations",
        sections: vec![GENRES, YEARS, TOP_MOVIES, TOP_TAGS],
    }
}

pub fn tags_page() -> Page {
    Page {
        slug: "tags",
        heading: "Analyse des tags",
        sections: vec![numbered(TOP_TAGS, "1. Top tags les plus utilisés")],
    }
}

pub fn films_page() -> Page {
    Page {
        slug: "films",
        heading: "Exploration des films",
        sections: vec![
            numbered(TOP_MOVIES, "1. Top 20 des films par nombre d'évaluations"),
            numbered(YEARS, "2. Films par année"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::KNOWN_ARTIFACTS;

    #[test]
    fn overview_lists_four_charts_in_order() {
        let page = overview_page();
        let names: Vec<_> = page.artifacts().collect();
        assert_eq!(names, KNOWN_ARTIFACTS.to_vec());
        let heights: Vec<_> = page.sections.iter().map(|s| s.height).collect();
        assert_eq!(heights, vec![600, 600, 800, 600]);
    }

    #[test]
    fn secondary_pages_number_their_own_headers() {
        let films = films_page();
        assert_eq!(films.sections[0].header, "1. Top 20 des films par nombre d'évaluations");
        assert_eq!(films.sections[1].header, "2. Films par année");
        assert_eq!(films.sections[1].missing_notice, "Graphique des années non trouvé");
        assert_eq!(tags_page().sections[0].header, "1. Top tags les plus utilisés");
    }

    #[test]
    fn every_artifact_is_known() {
        for page in [overview_page(), tags_page(), films_page()] {
            for name in page.artifacts() {
                assert!(KNOWN_ARTIFACTS.contains(&name), "{} is not a known artifact", name);
            }
        }
    }
}
