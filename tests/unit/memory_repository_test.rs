//! Tests for the in-memory repository.
//!
//! The same scenarios run against SQLite in the integration suite.

use fittrack::goals::NewGoal;
use fittrack::storage::{
    DatabaseError, GoalRepository, MemoryRepository, ProgressRepository, UserRepository,
    WorkoutRepository,
};
use fittrack::users::{NewUser, ProfileUpdate, UserId};
use fittrack::workouts::{export_csv, WorkoutInput};

fn register(repo: &MemoryRepository, name: &str) -> UserId {
    repo.insert_user(&NewUser {
        username: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password: "pw".to_string(),
        age: 30,
        gender: "Autre".to_string(),
        weight_kg: 70.0,
        height_cm: 175.0,
    })
    .unwrap()
}

fn goal(user_id: UserId, goal_type: &str) -> NewGoal {
    NewGoal {
        user_id,
        goal_type: goal_type.to_string(),
        target_value: 10.0,
        start_date: "2025-01-01".to_string(),
        end_date: "2025-02-01".to_string(),
        status: "En cours".to_string(),
    }
}

fn swim(user_id: UserId) -> WorkoutInput {
    WorkoutInput {
        user_id,
        workout_type_id: 3,
        duration_minutes: 40,
        distance_km: 1.5,
        calories: 350.0,
        start_time: "2025-01-15 18:00".to_string(),
        end_time: "2025-01-15 18:40".to_string(),
    }
}

#[test]
fn test_goals_for_user_are_exactly_theirs() {
    let repo = MemoryRepository::new();
    let alice = register(&repo, "Alice");
    let bob = register(&repo, "Bob");

    let a1 = repo.insert_goal(&goal(alice, "Distance")).unwrap();
    repo.insert_goal(&goal(bob, "Poids")).unwrap();
    let a2 = repo.insert_goal(&goal(alice, "Calories")).unwrap();

    let ids: Vec<_> = repo.list_goals(alice).unwrap().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![a1, a2]);
}

#[test]
fn test_user_update_changes_only_profile_fields() {
    let repo = MemoryRepository::new();
    let id = register(&repo, "Alice");
    let before = repo.get_user(id).unwrap().unwrap();

    let changed = repo
        .update_user(
            id,
            &ProfileUpdate {
                age: 31,
                gender: "Femme".to_string(),
                weight_kg: 68.0,
                height_cm: 176.0,
            },
        )
        .unwrap();
    assert!(changed);

    let after = repo.get_user(id).unwrap().unwrap();
    assert_eq!(after.age, 31);
    assert_eq!(after.email, before.email);
    assert_eq!(after.created_at, before.created_at);
    assert!(!repo
        .update_user(
            id + 99,
            &ProfileUpdate {
                age: 1,
                gender: String::new(),
                weight_kg: 1.0,
                height_cm: 1.0,
            }
        )
        .unwrap());
}

#[test]
fn test_update_goal_keeps_owner() {
    let repo = MemoryRepository::new();
    let alice = register(&repo, "Alice");
    let id = repo.insert_goal(&goal(alice, "Distance")).unwrap();

    let mut stored = repo.get_goal(id).unwrap().unwrap();
    stored.status = "Hors liste".to_string();
    stored.user_id = alice + 42;
    assert_eq!(repo.update_goal(&stored).unwrap(), 1);

    let reloaded = repo.get_goal(id).unwrap().unwrap();
    assert_eq!(reloaded.status, "Hors liste");
    assert_eq!(reloaded.user_id, alice);
}

#[test]
fn test_progress_move_to_missing_goal_rejected() {
    let repo = MemoryRepository::new();
    let alice = register(&repo, "Alice");
    let goal_id = repo.insert_goal(&goal(alice, "Distance")).unwrap();
    let id = repo.insert_progress(goal_id, 1.0, "2025-01-01").unwrap();

    let result = repo.update_progress(id, goal_id + 50, 2.0, "2025-01-02");
    assert!(matches!(result, Err(DatabaseError::ConstraintViolation(_))));
    assert_eq!(repo.get_progress(id).unwrap().unwrap().value, 1.0);
}

#[test]
fn test_workout_update_and_missing_delete() {
    let repo = MemoryRepository::new();
    let alice = register(&repo, "Alice");
    let id = repo.insert_workout(&swim(alice)).unwrap();

    let mut changed = swim(alice);
    changed.calories = 400.0;
    assert!(repo.update_workout(id, &changed).unwrap());
    assert_eq!(repo.get_workout(id).unwrap().unwrap().calories, 400.0);

    assert!(!repo.update_workout(id + 10, &changed).unwrap());
    assert_eq!(repo.delete_workout(id + 10).unwrap(), 0);
}

#[test]
fn test_csv_export_from_memory() {
    let repo = MemoryRepository::new();
    let alice = register(&repo, "Alice");
    repo.insert_workout(&swim(alice)).unwrap();

    let csv = export_csv(&repo, alice).unwrap();
    assert_eq!(
        csv,
        "Duration,Distance,Calories,StartTime,EndTime\n40,1.5,350.0,2025-01-15 18:00,2025-01-15 18:40\n"
    );
}
