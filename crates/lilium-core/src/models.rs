use serde::{Deserialize, Serialize};

/// One row of the note path view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteResult {
    pub id: String,
    pub title: String,
    pub full_path: String,
}

impl NoteResult {
    /// `[title][id]`
    #[must_use]
    pub fn to_markdown_link(&self) -> String {
        format!("[{}][{}]", self.title, self.id)
    }

    /// `[title][full_path]`
    #[must_use]
    pub fn to_markdown_link_by_path(&self) -> String {
        format!("[{}][{}]", self.title, self.full_path)
    }

    #[must_use]
    pub fn markdown_link(&self, style: LinkStyle) -> String {
        match style {
            LinkStyle::Id => self.to_markdown_link(),
            LinkStyle::Path => self.to_markdown_link_by_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    #[default]
    Id,
    Path,
}

/// Result of a note search.
///
/// `Idle` means the query was blank and nothing was searched. `Ranked`
/// always means the storage query ran; an empty vector there is a genuine
/// "no matches".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Idle,
    Ranked(Vec<NoteResult>),
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn notes(&self) -> &[NoteResult] {
        match self {
            Self::Idle => &[],
            Self::Ranked(notes) => notes,
        }
    }

    #[must_use]
    pub fn into_notes(self) -> Vec<NoteResult> {
        match self {
            Self::Idle => Vec::new(),
            Self::Ranked(notes) => notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub candidate_limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: crate::fuzzy::DEFAULT_RANK_LIMIT,
            candidate_limit: crate::search::DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> NoteResult {
        NoteResult {
            id: "4f1c".to_string(),
            title: "palette".to_string(),
            full_path: "projects/python/palette.md".to_string(),
        }
    }

    #[test]
    fn markdown_links_use_id_or_path() {
        let note = note();
        assert_eq!(note.to_markdown_link(), "[palette][4f1c]");
        assert_eq!(
            note.to_markdown_link_by_path(),
            "[palette][projects/python/palette.md]"
        );
        assert_eq!(note.markdown_link(LinkStyle::Path), note.to_markdown_link_by_path());
    }

    #[test]
    fn idle_and_empty_ranked_outcomes_are_distinct() {
        let idle = SearchOutcome::Idle;
        let empty = SearchOutcome::Ranked(Vec::new());
        assert_ne!(idle, empty);
        assert!(idle.is_idle());
        assert!(!empty.is_idle());
        assert!(idle.notes().is_empty() && empty.notes().is_empty());
    }

    #[test]
    fn default_options_match_palette_limits() {
        let options = SearchOptions::default();
        assert_eq!(options.limit, 50);
        assert_eq!(options.candidate_limit, 500);
    }
}
