//! Selection vocabularies for goal statuses and genders.

/// Goal statuses offered when none are configured.
pub const DEFAULT_GOAL_STATUSES: [&str; 3] = ["En cours", "Complété", "Abandonné"];

/// Gender labels offered when none are configured.
pub const DEFAULT_GENDERS: [&str; 3] = ["Homme", "Femme", "Autre"];

/// Index of the first entry equal to `value`, both sides trimmed.
pub fn selection_index(vocabulary: &[String], value: &str) -> Option<usize> {
    let value = value.trim();
    vocabulary.iter().position(|entry| entry.trim() == value)
}

pub fn default_goal_statuses() -> Vec<String> {
    DEFAULT_GOAL_STATUSES.iter().map(|s| s.to_string()).collect()
}

pub fn default_genders() -> Vec<String> {
    DEFAULT_GENDERS.iter().map(|s| s.to_string()).collect()
}
