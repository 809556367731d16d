use crate::config::RotviewConfig;
use colored::Colorize;
use figures::Figure;
use nalgebra::Vector3;
use rotations::prelude::*;
use std::fmt::Write;

const LABEL_WIDTH: usize = 18;

/// Formats `value` with `precision` decimals. Anything that rounds to zero prints as `0`,
/// never `-0`.
pub fn format_value(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

fn format_vector(v: &Vector3<f64>, precision: usize) -> String {
    format!(
        "[{}, {}, {}]",
        format_value(v.x, precision),
        format_value(v.y, precision),
        format_value(v.z, precision)
    )
}

fn label(text: &str) -> String {
    format!("{:<width$}", text, width = LABEL_WIDTH).bright_blue().to_string()
}

/// Every representation of the snapshot, one per line, angles in the configured units.
pub fn format_status(snapshot: &Snapshot, config: &RotviewConfig) -> String {
    let p = config.precision;
    let units = config.angle_units;
    let state = &snapshot.state;
    let mut out = String::new();

    let _ = writeln!(out, "{}", format!("revision {}", snapshot.revision).dimmed());

    let q = state.quaternion();
    let _ = writeln!(
        out,
        "{}w {}  x {}  y {}  z {}",
        label("quaternion"),
        format_value(q.w(), p),
        format_value(q.x(), p),
        format_value(q.y(), p),
        format_value(q.z(), p)
    );

    let e = state.euler_angles();
    let _ = write!(
        out,
        "{}roll {}  pitch {}  yaw {}",
        label(&format!("euler ({})", units.label())),
        format_value(units.from_radians(e.roll), p),
        format_value(units.from_radians(e.pitch), p),
        format_value(units.from_radians(e.yaw), p)
    );
    if e.is_gimbal_locked() {
        let _ = write!(out, "  {}", "gimbal lock".yellow());
    }
    out.push('\n');

    let axis_angle = state.angle_axis();
    let _ = writeln!(
        out,
        "{}angle {}  axis {}",
        label(&format!("axis-angle ({})", units.label())),
        format_value(units.from_radians(axis_angle.angle), p),
        format_vector(&axis_angle.axis, p)
    );

    let _ = writeln!(
        out,
        "{}{}",
        label("vector (rad)"),
        format_vector(&state.rotation_vector().get_value(), p)
    );

    let m = state.rotation_matrix().get_value();
    for (i, row) in m.row_iter().enumerate() {
        let text = if i == 0 { label("matrix") } else { " ".repeat(LABEL_WIDTH) };
        let _ = writeln!(
            out,
            "{}[{}  {}  {}]",
            text,
            format_value(row[0], p),
            format_value(row[1], p),
            format_value(row[2], p)
        );
    }

    out.trim_end().to_string()
}

/// The figure's vertices rotated by `state`, one per line.
pub fn format_vertices(figure: &Figure, state: &RotationState, config: &RotviewConfig) -> String {
    figure
        .rotated_vertices(&state.quaternion())
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{:>3} {}", i, format_vector(v, config.precision)))
        .collect::<Vec<_>>()
        .join("\n")
}
