//! Driving whole tutorials from the keyboard.

use proptest::prelude::*;

use projector_core::{LabSession, Magnification, MeasuredResult, PixelPoint, GEAR_OD};
use projector_input::{InputConfig, InputDispatcher, KeyCode, KeyModifiers, RawInput};

fn hold(
    dispatcher: &mut InputDispatcher,
    session: &mut LabSession,
    key: KeyCode,
    modifiers: KeyModifiers,
    presses: usize,
) {
    dispatcher.dispatch(&RawInput::key_down_with(key, modifiers), session);
    for _ in 1..presses {
        dispatcher.dispatch(&RawInput::key_repeat(key, modifiers), session);
    }
    dispatcher.dispatch(&RawInput::key_up(key), session);
}

#[test]
fn gear_tutorial_by_keyboard() {
    let mut session = LabSession::with_defaults();
    let mut dispatcher = InputDispatcher::default();

    session.start_tutorial(Some(GEAR_OD)).unwrap();
    session.select_sample_by_id("gear").unwrap();
    session.set_magnification(Magnification::X10);

    // 11 fast presses would reach -88; the crossing snaps to -86 on the last.
    hold(&mut dispatcher, &mut session, KeyCode::ArrowUp, KeyModifiers::SHIFT, 11);
    assert_eq!(session.reticle(), PixelPoint::new(0, -86));
    assert_eq!(session.tutorial().current_step(), 4);

    // Step 4 waits for the zero button: the keyboard is locked.
    hold(&mut dispatcher, &mut session, KeyCode::ArrowDown, KeyModifiers::SHIFT, 5);
    assert_eq!(session.reticle().y, -86);

    // 22 fast presses from -86 would overshoot to 90; the last one snaps to 84.
    session.set_relative_zero(projector_core::Axis::Y);
    hold(&mut dispatcher, &mut session, KeyCode::ArrowDown, KeyModifiers::SHIFT, 22);
    assert_eq!(session.reticle().y, 84);
    assert_eq!(session.tutorial().current_step(), 6);

    // The DRO panel is highlighted on the last step, so fine adjustment works.
    hold(&mut dispatcher, &mut session, KeyCode::ArrowDown, KeyModifiers::NONE, 2);
    assert_eq!(session.reticle().y, 86);
    assert_eq!(
        session.result().map(MeasuredResult::measured),
        Some("43.000 mm")
    );
}

#[test]
fn rebound_keys_drive_the_stage() {
    let config = InputConfig::from_yaml_str("bindings: { KeyW: up, KeyS: down }\n").unwrap();
    let mut dispatcher = InputDispatcher::new(config);
    let mut session = LabSession::with_defaults();

    hold(&mut dispatcher, &mut session, KeyCode::KeyW, KeyModifiers::NONE, 3);
    hold(&mut dispatcher, &mut session, KeyCode::ArrowUp, KeyModifiers::NONE, 3);
    assert_eq!(session.reticle(), PixelPoint::new(0, -3));
}

proptest! {
    /// Each press moves exactly the fine or fast amount when nothing is locked.
    #[test]
    fn press_moves_fine_or_fast(presses in prop::collection::vec((0usize..4, any::<bool>()), 1..40)) {
        let keys = [KeyCode::ArrowUp, KeyCode::ArrowDown, KeyCode::ArrowLeft, KeyCode::ArrowRight];
        let mut dispatcher = InputDispatcher::default();
        let mut session = LabSession::with_defaults();
        let mut expected = PixelPoint::ZERO;

        for (k, fast) in presses {
            let amount = if fast { 8 } else { 1 };
            let modifiers = if fast { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
            match keys[k] {
                KeyCode::ArrowUp => expected.y -= amount,
                KeyCode::ArrowDown => expected.y += amount,
                KeyCode::ArrowLeft => expected.x -= amount,
                _ => expected.x += amount,
            }
            dispatcher.dispatch(&RawInput::key_down_with(keys[k], modifiers), &mut session);
            prop_assert_eq!(session.reticle(), expected);
        }
    }
}
