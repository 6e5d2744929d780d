//! In-memory project store: loaded once from a static JSON resource, never
//! mutated afterwards. Filtering and lookup are pure functions over the
//! record list so they run identically on the host and in the browser.

use serde::Deserialize;
use thiserror::Error;

use crate::config::FEATURED_FALLBACK_COUNT;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// The request itself never produced a response.
    #[error("project data request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status.
    #[error("project data fetch failed with HTTP status {status}")]
    Fetch { status: u16 },
    /// The payload is not a valid project array.
    #[error("project data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One showcased project. Records are identified by `id`; the title is
/// display-only and may collide across records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    pub category: String,
    pub year: u16,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Active filter selection; `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    pub search: String,
    pub category: Option<String>,
    pub year: Option<u16>,
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    projects: Vec<ProjectRecord>,
}

impl Gallery {
    pub fn new(mut projects: Vec<ProjectRecord>) -> Self {
        // Legacy data may omit ids; derive one from the title so lookups
        // still work. Authored data is expected to carry explicit ids.
        for record in &mut projects {
            if record.id.is_empty() {
                record.id = slugify(&record.title);
            }
        }
        Self { projects }
    }

    pub fn from_json(payload: &str) -> Result<Self, GalleryError> {
        let projects: Vec<ProjectRecord> = serde_json::from_str(payload)?;
        Ok(Self::new(projects))
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Records flagged for the hero carousel, or the first few as fallback.
    pub fn featured(&self) -> Vec<&ProjectRecord> {
        let flagged: Vec<&ProjectRecord> =
            self.projects.iter().filter(|p| p.is_featured).collect();
        if flagged.is_empty() {
            self.projects.iter().take(FEATURED_FALLBACK_COUNT).collect()
        } else {
            flagged
        }
    }

    /// Visible subset for the grid. Conjunctive: every active criterion must
    /// match, so filtering in stages equals filtering at once.
    pub fn filter(&self, query: &FilterQuery) -> Vec<&ProjectRecord> {
        self.projects
            .iter()
            .filter(|record| record.matches(query))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|record| record.id == id)
    }

    /// Distinct categories in first-seen order, for the filter select.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.projects {
            if !seen.contains(&record.category.as_str()) {
                seen.push(record.category.as_str());
            }
        }
        seen
    }

    /// Distinct years, newest first, for the filter select.
    pub fn years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self.projects.iter().map(|p| p.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}

impl ProjectRecord {
    fn matches(&self, query: &FilterQuery) -> bool {
        let needle = query.search.to_lowercase();
        let text_hit = self.title.to_lowercase().contains(&needle)
            || self
                .tech
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));
        let category_hit = query
            .category
            .as_deref()
            .map_or(true, |c| self.category == c);
        let year_hit = query.year.map_or(true, |y| self.year == y);
        text_hit && category_hit && year_hit
    }

    /// Preferred outbound link: live demo first, then the repository.
    pub fn primary_link(&self) -> Option<&str> {
        self.demo.as_deref().or(self.github.as_deref())
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_fill_missing_ids() {
        let gallery = Gallery::new(vec![ProjectRecord {
            id: String::new(),
            title: "Flow Field Studio".into(),
            description: String::new(),
            long_description: String::new(),
            category: "Graphics".into(),
            year: 2024,
            tech: vec![],
            image: None,
            demo: None,
            github: None,
            is_featured: false,
        }]);
        assert!(gallery.find("flow-field-studio").is_some());
    }

    #[test]
    fn primary_link_prefers_demo() {
        let record = ProjectRecord {
            id: "x".into(),
            title: "X".into(),
            description: String::new(),
            long_description: String::new(),
            category: "Web".into(),
            year: 2023,
            tech: vec![],
            image: None,
            demo: Some("https://example.com".into()),
            github: Some("https://github.com/x/x".into()),
            is_featured: false,
        };
        assert_eq!(record.primary_link(), Some("https://example.com"));
    }
}
