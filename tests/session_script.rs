//! Scripted sessions against the built-in and YAML-loaded assets.

use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use profile_projector::projector_core::{CatalogError, MeasuredResult, PixelPoint};
use profile_projector::{
    report, AssetPaths, LabAssets, LoadError, SessionRunner, SessionScript,
};

fn session_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("sessions")
        .join(name)
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn gear_session_passes() {
    let script = SessionScript::load(session_file("gear_od.yaml")).unwrap();
    let summary = SessionRunner::new(&LabAssets::builtin()).run(&script);

    assert!(summary.passed(), "{}", report::render_text(&summary));
    assert!(summary.faults.is_empty());
    assert!(summary.replay_consistent);
    // sample, lens, top edge, zero, bottom edge
    assert_eq!(summary.advances, 5);
    assert_eq!(summary.snapshot.reticle, PixelPoint::new(0, 84));
    assert_eq!(summary.snapshot.dro_y, "-42.500");
}

#[test]
fn angle_session_passes() {
    let script = SessionScript::load(session_file("angle_measure.yaml")).unwrap();
    let summary = SessionRunner::new(&LabAssets::builtin()).run(&script);

    assert!(summary.passed(), "{}", report::render_text(&summary));
    assert_eq!(summary.snapshot.angle_points.len(), 4);
    match &summary.snapshot.result {
        Some(MeasuredResult::Angle {
            reference_angle, ..
        }) => assert_eq!(reference_angle, "60.00°"),
        other => panic!("expected angle result, got {other:?}"),
    }
}

#[test]
fn locked_keys_are_counted() {
    let script = SessionScript::from_yaml_str(
        r#"
name: locked
events:
  - { action: start_tutorial, name: GEAR_OD }
  - { action: key, key: ArrowDown, presses: 5 }
  - { action: expect, reticle: { x: 0, y: 0 }, step: 1 }
"#,
    )
    .unwrap();
    let summary = SessionRunner::new(&LabAssets::builtin()).run(&script);
    assert!(summary.passed());
    assert_eq!(summary.locked_presses, 5);
    assert_eq!(summary.intents.len(), 1);
}

#[test]
fn faults_and_failed_expectations_are_reported() {
    let script = SessionScript::from_yaml_str(
        r#"
name: broken
events:
  - { action: select_sample, sample: bolt }
  - { action: magnification, level: 15 }
  - { action: add_point }
  - { action: expect, step: 2, tutorial: GEAR_OD }
"#,
    )
    .unwrap();
    let summary = SessionRunner::new(&LabAssets::builtin()).run(&script);

    assert!(!summary.passed());
    let fault_indices: Vec<_> = summary.faults.iter().map(|f| f.index).collect();
    assert_eq!(fault_indices, vec![0, 1]);
    assert_eq!(summary.faults[0].message, "Unknown sample: bolt");
    assert_eq!(summary.failures.len(), 2);
    assert!(summary.failures.iter().all(|f| f.index == 3));

    // Faulting intents are still logged; replay absorbs them the same way.
    assert_eq!(summary.intents.len(), 3);
    assert!(summary.replay_consistent);

    let json = report::to_json(&summary).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["script"], "broken");
    assert_eq!(value["faults"].as_array().map(Vec::len), Some(2));
}

#[test]
fn yaml_overrides_are_used() {
    let config = write_temp("alignment_tolerance_px: 4\nidle_message: Pick a tutorial\n");
    let tutorials = write_temp(
        r#"
tutorials:
  - name: BORE
    title: Bore Diameter
    start_message: Measure the bore.
    measurement: { kind: diameter, reference: diameter }
    required_sample: ring
    steps:
      - { id: 1, target_id: sample-ring, message: Pick the ring }
      - id: 2
        target_id: stage-controls-grid
        message: Move to the top edge
        advance: { on: axis_crossing, axis: y, target: -40 }
      - { id: 3, target_id: zero-y-button, message: Zero Y }
      - id: 4
        target_id: stage-controls-grid
        message: Move to the bottom edge
        advance: { on: axis_crossing, axis: y, target: 40 }
      - { id: 5, target_id: dro-panel, message: Read the DRO, advance: { on: terminal } }
"#,
    );
    let samples = write_temp(
        r#"
experiments:
  profile-projector:
    - { id: ring, name: Ring, diameter: "20.00 mm" }
"#,
    );

    let assets = LabAssets::load(&AssetPaths {
        config: Some(config.path().to_path_buf()),
        tutorials: Some(tutorials.path().to_path_buf()),
        samples: Some(samples.path().to_path_buf()),
        input: None,
    })
    .unwrap();
    assert_eq!(assets.config.alignment_tolerance_px, 4);
    assert_eq!(assets.tutorials.names().collect::<Vec<_>>(), vec!["BORE"]);

    let script = SessionScript::from_yaml_str(
        r#"
name: bore
events:
  - { action: expect, tutorial: NONE }
  - { action: start_tutorial, name: BORE }
  - { action: select_sample, sample: ring }
  - { action: key, key: ArrowUp, shift: true, presses: 5 }
  - { action: zero, axis: y }
  - { action: key, key: ArrowDown, shift: true, presses: 10 }
  - { action: expect, step: 5, finished: true, result: "20.000 mm" }
"#,
    )
    .unwrap();
    let summary = SessionRunner::new(&assets).run(&script);

    // Only the deliberately wrong first expectation fails.
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].index, 0);
    assert_eq!(summary.failures[0].message, "expected tutorial NONE, got none");
    assert!(summary.replay_consistent);
    assert_eq!(summary.snapshot.reticle, PixelPoint::new(0, 40));
}

#[test]
fn invalid_catalog_is_rejected() {
    let tutorials = write_temp(
        "tutorials:\n  - { name: X, title: X, start_message: s, measurement: { kind: angle }, steps: [] }\n",
    );
    let err = LabAssets::load(&AssetPaths {
        tutorials: Some(tutorials.path().to_path_buf()),
        ..AssetPaths::default()
    })
    .unwrap_err();
    assert!(matches!(err, LoadError::Catalog(CatalogError::EmptyScript(name)) if name == "X"));
}

#[test]
fn missing_script_file() {
    let err = SessionScript::load("/nonexistent/session.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/session.yaml"));
}

mod replay {
    use super::*;
    use profile_projector::projector_core::Axis;
    use profile_projector::SessionEvent;
    use proptest::prelude::*;

    fn event() -> impl Strategy<Value = SessionEvent> {
        let axis = prop_oneof![Just(Axis::X), Just(Axis::Y)];
        prop_oneof![
            3 => (axis.clone(), -30i32..30).prop_map(|(axis, delta)| SessionEvent::Move { axis, delta }),
            1 => axis.prop_map(|axis| SessionEvent::Zero { axis }),
            1 => prop_oneof![Just("GEAR_OD"), Just("SCREW_OD"), Just("ANGLE_MEASURE")]
                .prop_map(|n| SessionEvent::StartTutorial { name: Some(n.to_string()) }),
            1 => prop_oneof![Just("gear"), Just("screw"), Just("v-profile"), Just("bolt")]
                .prop_map(|s| SessionEvent::SelectSample { sample: s.to_string() }),
            1 => prop_oneof![Just(10u32), Just(20), Just(25)]
                .prop_map(|level| SessionEvent::Magnification { level }),
            1 => Just(SessionEvent::ToggleAngleMode),
            1 => Just(SessionEvent::AddPoint),
            2 => (prop_oneof![
                Just(profile_projector::projector_input::KeyCode::ArrowUp),
                Just(profile_projector::projector_input::KeyCode::ArrowRight),
            ], any::<bool>(), 1u32..4)
                .prop_map(|(key, shift, presses)| SessionEvent::Key { key, shift, presses }),
        ]
    }

    proptest! {
        /// Whatever a script does, its intent log rebuilds the same bench.
        #[test]
        fn any_script_replays_consistently(events in prop::collection::vec(event(), 1..40)) {
            let script = SessionScript {
                name: "random".into(),
                description: String::new(),
                events,
            };
            let summary = SessionRunner::new(&LabAssets::builtin()).run(&script);
            prop_assert!(summary.replay_consistent);
            prop_assert!(summary.failures.is_empty());
        }
    }
}
