//! Tests for selection list lookup.

use fittrack::goals::Goal;
use fittrack::vocabulary::{default_goal_statuses, selection_index};

fn goal_with_status(status: &str) -> Goal {
    Goal {
        id: 1,
        user_id: 1,
        goal_type: "Distance".to_string(),
        target_value: 42.0,
        start_date: "2025-01-01".to_string(),
        end_date: "2025-12-31".to_string(),
        status: status.to_string(),
    }
}

#[test]
fn test_known_status_has_index() {
    let statuses = default_goal_statuses();
    assert_eq!(goal_with_status("Complété").status_index(&statuses), Some(1));
}

#[test]
fn test_unknown_status_has_no_index() {
    let statuses = default_goal_statuses();
    assert_eq!(goal_with_status("Suspendu").status_index(&statuses), None);
}

#[test]
fn test_stored_status_with_padding_has_index() {
    let statuses = default_goal_statuses();
    assert_eq!(goal_with_status("Complété ").status_index(&statuses), Some(1));
    assert_eq!(goal_with_status("  En cours").status_index(&statuses), Some(0));
}

#[test]
fn test_entries_are_trimmed() {
    let vocabulary = vec!["  En cours ".to_string(), "Complété".to_string()];
    assert_eq!(selection_index(&vocabulary, "En cours"), Some(0));
}

#[test]
fn test_empty_vocabulary() {
    assert_eq!(selection_index(&[], "En cours"), None);
}
