//! Rendering run summaries and catalog listings.

use std::fmt::Write;

use projector_core::{LabSnapshot, SampleCatalog, TutorialCatalog};

use crate::script::RunSummary;

pub fn to_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Plain text summary of the final bench state.
pub fn render_snapshot(snapshot: &LabSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "DRO          X {}  Y {}  ({})",
        snapshot.dro_x, snapshot.dro_y, snapshot.unit
    );
    let _ = writeln!(
        out,
        "Reticle      ({}, {})  zero ({}, {})",
        snapshot.reticle.x, snapshot.reticle.y, snapshot.zero_offset.x, snapshot.zero_offset.y
    );
    let _ = writeln!(out, "Lens         {}", snapshot.magnification);
    let _ = writeln!(
        out,
        "Sample       {}",
        snapshot.selected_sample.as_deref().unwrap_or("-")
    );
    if snapshot.angle_mode {
        let _ = writeln!(out, "Angle points {}", snapshot.angle_points.len());
    }
    match &snapshot.tutorial {
        Some(name) => {
            let _ = writeln!(
                out,
                "Tutorial     {name} step {}{}",
                snapshot.current_step,
                if snapshot.tutorial_finished { " (finished)" } else { "" }
            );
        }
        None => {
            let _ = writeln!(out, "Tutorial     -");
        }
    }
    let _ = writeln!(out, "Message      {}", snapshot.message);
    if let Some(result) = &snapshot.result {
        let _ = writeln!(
            out,
            "Result       {} (reference {})",
            result.measured(),
            result.reference().unwrap_or("-")
        );
    }
    out
}

/// Plain text run summary: counters, faults, failures and the final state.
pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} events, {} advances, {} locked presses",
        summary.script, summary.events, summary.advances, summary.locked_presses
    );
    for fault in &summary.faults {
        let _ = writeln!(out, "  fault at event {}: {}", fault.index, fault.message);
    }
    for failure in &summary.failures {
        let _ = writeln!(out, "  FAILED at event {}: {}", failure.index, failure.message);
    }
    if !summary.replay_consistent {
        let _ = writeln!(out, "  replay of the intent log diverged");
    }
    out.push_str(&render_snapshot(&summary.snapshot));
    out
}

/// One line per tutorial: name, title, step count.
pub fn render_tutorials(catalog: &TutorialCatalog) -> String {
    let mut out = String::new();
    for script in catalog.iter() {
        let _ = writeln!(
            out,
            "{:<14} {} ({} steps)",
            script.name,
            script.title,
            script.steps.len()
        );
    }
    out
}

/// One line per sample with its reference values.
pub fn render_samples(catalog: &SampleCatalog, experiment_id: &str) -> String {
    let mut out = String::new();
    for sample in catalog.samples_for(experiment_id) {
        let references: Vec<String> = [
            ("diameter", &sample.diameter),
            ("screw diameter", &sample.screw_diameter),
            ("angle", &sample.angle),
            ("pitch", &sample.pitch),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label} {v}")))
        .collect();
        let _ = writeln!(out, "{:<10} {:<16} {}", sample.id, sample.name, references.join(", "));
    }
    out
}
