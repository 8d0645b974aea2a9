//! Tests for form validation.

use fittrack::validation::{InputError, ProfileForm, ProgressForm, WorkoutForm};
use fittrack::vocabulary::default_genders;
use fittrack::workouts::{WorkoutType, DEFAULT_WORKOUT_TYPES};

fn seeded_types() -> Vec<WorkoutType> {
    DEFAULT_WORKOUT_TYPES
        .iter()
        .zip(1..)
        .map(|((name, description), id)| WorkoutType {
            id,
            name: name.to_string(),
            description: Some(description.to_string()),
        })
        .collect()
}

#[test]
fn test_profile_form_gender_must_be_listed() {
    let form = ProfileForm {
        age: "30".to_string(),
        gender: "Inconnu".to_string(),
        weight: "70".to_string(),
        height: "170".to_string(),
    };
    assert!(matches!(
        form.validate(&default_genders()),
        Err(InputError::NotInVocabulary { field: "Gender", .. })
    ));
}

#[test]
fn test_workout_form_reports_first_bad_field() {
    let form = WorkoutForm {
        workout_type: "Natation".to_string(),
        duration: "1h".to_string(),
        distance: "abc".to_string(),
        calories: "300".to_string(),
        start_time: "18:00".to_string(),
        end_time: "19:00".to_string(),
    };
    assert_eq!(
        form.validate(1, &seeded_types()),
        Err(InputError::InvalidNumber {
            field: "Duration",
            value: "1h".to_string()
        })
    );
}

#[test]
fn test_workout_form_free_text_times_accepted() {
    let form = WorkoutForm {
        workout_type: "natation".to_string(),
        duration: "40".to_string(),
        distance: "1,2".to_string(),
        calories: "300".to_string(),
        start_time: "ce soir".to_string(),
        end_time: "plus tard".to_string(),
    };
    let input = form.validate(5, &seeded_types()).unwrap();
    assert_eq!(input.workout_type_id, 3);
    assert_eq!(input.distance_km, 1.2);
    assert_eq!(input.start_time, "ce soir");
}

#[test]
fn test_progress_form_missing_date() {
    let form = ProgressForm {
        value: "3".to_string(),
        date: String::new(),
    };
    assert_eq!(form.validate(), Err(InputError::Missing("Date")));
}
