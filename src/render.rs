//! Page composition: sections in, blocks out.

use anyhow::Result;
use std::sync::Arc;

use crate::artifact::{ArtifactReader, ArtifactSource};
use crate::logging::{log_page_rendered, v_str, ProfileScope};
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Header(String),
    /// Artifact markup, passed through untouched.
    Embed {
        artifact: String,
        content: Arc<str>,
        height: u32,
    },
    Notice(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub slug: String,
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl RenderedPage {
    pub fn headers(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Header(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Notice(n) => Some(n.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub fn render_page<S: ArtifactSource>(
    page: &Page,
    reader: &mut ArtifactReader<S>,
) -> Result<RenderedPage> {
    let _scope = ProfileScope::with_context("render_page", &[("page", v_str(page.slug))]);
    let mut blocks = Vec::with_capacity(page.sections.len() * 2);
    let mut missing = 0usize;

    for section in &page.sections {
        blocks.push(Block::Header(section.header.to_string()));
        match reader.load(section.artifact)? {
            Some(content) if !content.is_empty() => blocks.push(Block::Embed {
                artifact: section.artifact.to_string(),
                content,
                height: section.height,
            }),
            // an empty chart file counts as missing
            _ => {
                missing += 1;
                blocks.push(Block::Notice(section.missing_notice.to_string()));
            }
        }
    }

    log_page_rendered(
        page.slug,
        page.sections.len(),
        page.sections.len() - missing,
        missing,
    );
    Ok(RenderedPage {
        slug: page.slug.to_string(),
        heading: page.heading.to_string(),
        blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::overview_page;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn all_missing_still_renders_every_header() {
        let dir = TempDir::new().unwrap();
        let mut reader = ArtifactReader::new(dir.path());
        let rendered = render_page(&overview_page(), &mut reader).unwrap();
        assert_eq!(
            rendered.headers(),
            vec![
                "1. Distribution des genres",
                "2. Films par année",
                "3. Top 20 des films par nombre d'évaluations",
                "4. Top tags les plus utilisés",
            ]
        );
        assert_eq!(
            rendered.notices(),
            vec![
                "Graphique des genres non trouvé",
                "Graphique des années non trouvé",
                "Graphique des films non trouvé",
                "Graphique des tags non trouvé",
            ]
        );
    }

    #[test]
    fn embed_keeps_height_and_content() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top_movies_by_ratings.html"), "<table></table>").unwrap();
        let mut reader = ArtifactReader::new(dir.path());
        let rendered = render_page(&overview_page(), &mut reader).unwrap();
        assert_eq!(
            rendered.blocks[5],
            Block::Embed {
                artifact: "top_movies_by_ratings".to_string(),
                content: Arc::from("<table></table>"),
                height: 800,
            }
        );
        assert_eq!(rendered.notices().len(), 3);
    }

    #[test]
    fn empty_chart_file_shows_notice() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("genre_counts.html"), "").unwrap();
        let mut reader = ArtifactReader::new(dir.path());
        let rendered = render_page(&overview_page(), &mut reader).unwrap();
        assert_eq!(
            rendered.blocks[1],
            Block::Notice("Graphique des genres non trouvé".to_string())
        );
        // the reader itself still hands back the exact (empty) content
        assert_eq!(reader.cached("genre_counts"), Some(Some("")));
    }
}
