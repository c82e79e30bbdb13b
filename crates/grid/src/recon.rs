use serde::{Deserialize, Serialize};

/// Reconciliation status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    None,
    New,
    Matched,
}

impl std::fmt::Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::New => write!(f, "new"),
            Self::Matched => write!(f, "matched"),
        }
    }
}

/// Provenance tag: how the judgment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentAction {
    Unknown,
    Single,
    Mass,
}

impl Default for JudgmentAction {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for JudgmentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Single => write!(f, "single"),
            Self::Mass => write!(f, "mass"),
        }
    }
}

/// A reconciliation candidate: the entity a cell is (or could be) matched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconCandidate {
    pub id: String,
    pub name: String,
    pub types: Vec<String>,
}

impl ReconCandidate {
    pub fn new(id: &str, name: &str, types: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Per-cell reconciliation state: match judgment plus provenance.
///
/// Sharing is by `Arc` identity, not value equality: all cells judged
/// together in one pass reference one `Recon` instance, and
/// `judgment_batch_size` counts exactly that population.
#[derive(Debug, Clone, PartialEq)]
pub struct Recon {
    /// History entry under which this state was created.
    pub history_entry_id: u64,
    /// URI of the identifier vocabulary this state is scoped to.
    pub identifier_space: String,
    /// URI of the schema/type vocabulary this state is scoped to.
    pub schema_space: String,
    pub judgment: Judgment,
    pub matched: Option<ReconCandidate>,
    /// Rank of the match in a ranked suggestion list; -1 = force-assigned.
    pub match_rank: i32,
    pub judgment_action: JudgmentAction,
    /// Number of cells sharing this exact instance within one apply pass.
    pub judgment_batch_size: u32,
}

impl Recon {
    /// Fresh, unjudged state for a cell that had none.
    pub fn new(history_entry_id: u64, identifier_space: &str, schema_space: &str) -> Self {
        Self {
            history_entry_id,
            identifier_space: identifier_space.to_string(),
            schema_space: schema_space.to_string(),
            judgment: Judgment::None,
            matched: None,
            match_rank: -1,
            judgment_action: JudgmentAction::Unknown,
            judgment_batch_size: 0,
        }
    }

    /// Lineage-preserving copy: keeps the spaces, takes the new history-entry
    /// id, resets all judgment-related fields. Never aliases `self` — revert
    /// must be able to restore the original instance by reference.
    pub fn derive(&self, history_entry_id: u64) -> Self {
        Self {
            history_entry_id,
            identifier_space: self.identifier_space.clone(),
            schema_space: self.schema_space.clone(),
            judgment: Judgment::None,
            matched: None,
            match_rank: -1,
            judgment_action: JudgmentAction::Unknown,
            judgment_batch_size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_keeps_spaces_and_resets_judgment() {
        let mut original = Recon::new(7, "http://id.example/", "http://schema.example/");
        original.judgment = Judgment::Matched;
        original.matched = Some(ReconCandidate::new("Q1", "One", &["T1"]));
        original.match_rank = 2;
        original.judgment_action = JudgmentAction::Single;
        original.judgment_batch_size = 5;

        let derived = original.derive(42);
        assert_eq!(derived.history_entry_id, 42);
        assert_eq!(derived.identifier_space, "http://id.example/");
        assert_eq!(derived.schema_space, "http://schema.example/");
        assert_eq!(derived.judgment, Judgment::None);
        assert!(derived.matched.is_none());
        assert_eq!(derived.match_rank, -1);
        assert_eq!(derived.judgment_action, JudgmentAction::Unknown);
        assert_eq!(derived.judgment_batch_size, 0);
        // Original untouched
        assert_eq!(original.history_entry_id, 7);
        assert_eq!(original.judgment, Judgment::Matched);
    }

    #[test]
    fn judgment_action_display_is_lowercase_tag() {
        assert_eq!(JudgmentAction::Mass.to_string(), "mass");
        assert_eq!(JudgmentAction::Single.to_string(), "single");
        assert_eq!(JudgmentAction::Unknown.to_string(), "unknown");
    }

    #[test]
    fn candidate_allows_empty_types() {
        let c = ReconCandidate::new("Q90", "Paris", &[]);
        assert!(c.types.is_empty());
    }
}
