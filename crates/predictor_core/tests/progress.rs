use predictor_core::{FormProgress, StepState};

#[test]
fn percent_counts_non_empty_trimmed_values() {
    let progress = FormProgress::from_values(["a", " ", "", "b", "  c  ", "\t", "0"]);
    assert_eq!(progress.filled, 4);
    assert_eq!(progress.total, 7);
    assert_eq!(progress.percent(), (4.0 / 7.0) * 100.0);
    assert!(!progress.is_complete());
}

#[test]
fn empty_registry_is_complete() {
    let progress = FormProgress::from_values(Vec::<&str>::new());
    assert_eq!(progress.percent(), 100.0);
    assert!(progress.is_complete());
    assert_eq!(progress.steps(), [StepState::Completed; 3]);
}

#[test]
fn nothing_filled_leaves_every_step_inactive() {
    let progress = FormProgress::from_values(["", "", ""]);
    assert_eq!(progress.percent(), 0.0);
    assert_eq!(progress.steps(), [StepState::Inactive; 3]);
}

#[test]
fn steps_follow_three_buckets() {
    let cases = [
        (1, [StepState::Active, StepState::Inactive, StepState::Inactive]),
        (2, [StepState::Active, StepState::Inactive, StepState::Inactive]),
        (3, [StepState::Completed, StepState::Active, StepState::Inactive]),
        (4, [StepState::Completed, StepState::Active, StepState::Inactive]),
        (5, [StepState::Completed, StepState::Completed, StepState::Active]),
        (6, [StepState::Completed, StepState::Completed, StepState::Active]),
        (7, [StepState::Completed; 3]),
    ];
    for (filled, expected) in cases {
        let values: Vec<&str> = (0..7).map(|i| if i < filled { "x" } else { "" }).collect();
        let progress = FormProgress::from_values(values);
        assert_eq!(progress.steps(), expected, "filled {filled}");
    }
}

#[test]
fn thirds_stay_in_the_lower_bucket() {
    let one = FormProgress::from_values(["x", "", ""]);
    assert_eq!(one.current_step(), 0);
    assert_eq!(
        one.steps(),
        [StepState::Active, StepState::Inactive, StepState::Inactive]
    );

    let two = FormProgress::from_values(["x", "y", ""]);
    assert_eq!(two.current_step(), 1);
    assert_eq!(
        two.steps(),
        [StepState::Completed, StepState::Active, StepState::Inactive]
    );
}
