use predictor_core::{prediction_form_fields, update, FormState, Msg};

#[test]
fn update_is_noop() {
    let state = FormState::new(prediction_form_fields()).unwrap();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
