use crate::config::RotviewConfig;
use crate::display::{format_status, format_vertices};
use crate::errors::RotviewErrors;
use clap::{Parser, Subcommand, ValueEnum};
use figures::{Figure, FigureErrors, FigureKind, mesh::Mesh};
use log::debug;
use nalgebra::Matrix3;
use rotations::prelude::*;
use std::path::Path;

#[derive(Debug, Parser)]
#[command(name = "rotview", disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Set the rotation from a quaternion (normalized before use)
    #[command(name = "quat", allow_negative_numbers = true)]
    Quaternion { w: f64, x: f64, y: f64, z: f64 },
    /// Set the rotation from an angle about an axis
    #[command(allow_negative_numbers = true)]
    AxisAngle { angle: f64, x: f64, y: f64, z: f64 },
    /// Set the rotation from roll, pitch and yaw
    #[command(allow_negative_numbers = true)]
    Euler { roll: f64, pitch: f64, yaw: f64 },
    /// Set the rotation from a rotation vector in radians
    #[command(allow_negative_numbers = true)]
    Vector { x: f64, y: f64, z: f64 },
    /// Set the rotation from nine matrix elements, row by row
    #[command(allow_negative_numbers = true)]
    Matrix {
        #[arg(num_args = 9, required = true)]
        elements: Vec<f64>,
    },
    /// Reset to the identity rotation
    Reset,
    /// Set a uniformly random rotation
    Random,
    /// Add a small increment to one Euler angle
    #[command(allow_negative_numbers = true)]
    Nudge {
        #[arg(value_enum)]
        axis: EulerAxis,
        delta: f64,
    },
    /// Switch the figure (cube, tetrahedron, pyramid or a .ron mesh file)
    Figure { name: String },
    /// Print the rotated vertices of the current figure
    Vertices,
    /// Print every representation of the current rotation
    Status,
    /// Exit rotview
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EulerAxis {
    Roll,
    Pitch,
    Yaw,
}

/// Parses one line of REPL input.
pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(std::iter::once("rotview").chain(line.split_whitespace()))
        .map(|line| line.command)
}

/// What the REPL should do after a command ran.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The shared rotation was committed at this revision.
    Updated(u64),
    Print(String),
    Exit,
}

/// Everything a command can act on.
#[derive(Debug)]
pub struct Session {
    pub shared: SharedRotation,
    pub figure: Figure,
    pub config: RotviewConfig,
    /// Euler angles last set by `euler` or `nudge`, with the revision they produced.
    commanded: Option<(u64, EulerAngles)>,
}

impl Session {
    pub fn new(config: RotviewConfig) -> Self {
        Self {
            shared: SharedRotation::default(),
            figure: Figure::from(config.default_figure),
            config,
            commanded: None,
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, RotviewErrors> {
        let units = self.config.angle_units;
        let revision = match command {
            Command::Quaternion { w, x, y, z } => {
                self.shared.update(|state| state.set_from_quaternion(w, x, y, z))?
            }
            Command::AxisAngle { angle, x, y, z } => {
                let angle = units.to_radians(angle);
                self.shared.update(|state| state.set_from_angle_axis(angle, x, y, z))?
            }
            Command::Euler { roll, pitch, yaw } => {
                let angles = EulerAngles::new(
                    units.to_radians(roll),
                    units.to_radians(pitch),
                    units.to_radians(yaw),
                );
                self.commit_euler(angles)?
            }
            Command::Vector { x, y, z } => {
                self.shared.update(|state| state.set_from_rotation_vector(x, y, z))?
            }
            Command::Matrix { elements } => {
                if elements.len() != 9 {
                    return Err(RotviewErrors::MatrixElements(elements.len()));
                }
                let matrix = RotationMatrix::with_tolerance(
                    Matrix3::from_row_slice(&elements),
                    self.config.matrix_tolerance,
                )?;
                self.shared
                    .update(|state| state.set_from_rotation_matrix(&matrix))?
            }
            Command::Reset => self.shared.update(|state| {
                state.reset();
                Ok::<(), RotationErrors>(())
            })?,
            Command::Random => {
                let q = UnitQuaternion::rand().get_value();
                self.shared
                    .update(|state| state.set_from_quaternion(q.w, q.x, q.y, q.z))?
            }
            Command::Nudge { axis, delta } => self.nudge(axis, delta)?,
            Command::Figure { name } => {
                self.figure = figure_from_name(&name)?;
                return Ok(Outcome::Print(format!("figure set to {}", self.figure.name())));
            }
            Command::Vertices => {
                let state = self.shared.state();
                return Ok(Outcome::Print(format_vertices(&self.figure, &state, &self.config)));
            }
            Command::Status => {
                let snapshot = self.shared.snapshot();
                return Ok(Outcome::Print(format_status(&snapshot, &self.config)));
            }
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Updated(revision))
    }

    /// Adds `delta`, limited to `max_nudge`, to one of the current Euler angles.
    ///
    /// Steps build on the last commanded angles while nothing else has changed the
    /// rotation, since extracted pitch never leaves [-90, 90] degrees.
    fn nudge(&mut self, axis: EulerAxis, delta: f64) -> Result<u64, RotationErrors> {
        let limit = self.config.max_nudge;
        let clamped = delta.clamp(-limit, limit);
        if clamped != delta {
            debug!("nudge of {delta} limited to {clamped}");
        }
        let step = self.config.angle_units.to_radians(clamped);

        let snapshot = self.shared.snapshot();
        let mut angles = match self.commanded {
            Some((revision, angles)) if revision == snapshot.revision => angles,
            _ => snapshot.state.euler_angles(),
        };
        match axis {
            EulerAxis::Roll => angles.roll += step,
            EulerAxis::Pitch => angles.pitch += step,
            EulerAxis::Yaw => angles.yaw += step,
        }
        self.commit_euler(angles)
    }

    fn commit_euler(&mut self, angles: EulerAngles) -> Result<u64, RotationErrors> {
        let EulerAngles { roll, pitch, yaw } = angles;
        let revision = self
            .shared
            .update(|state| state.set_from_euler_angles(roll, pitch, yaw))?;
        self.commanded = Some((revision, angles));
        Ok(revision)
    }
}

fn figure_from_name(name: &str) -> Result<Figure, RotviewErrors> {
    let kind = match name.to_lowercase().as_str() {
        "cube" => Some(FigureKind::Cube),
        "tetrahedron" => Some(FigureKind::Tetrahedron),
        "pyramid" => Some(FigureKind::Pyramid),
        _ => None,
    };
    if let Some(kind) = kind {
        return Ok(Figure::from(kind));
    }

    let path = Path::new(name);
    if path.extension().is_some_and(|ext| ext == "ron") {
        let mesh = Mesh::from_ron_file(path).map_err(FigureErrors::from)?;
        Ok(Figure::from(mesh))
    } else {
        Err(RotviewErrors::UnknownFigure(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AngleUnits;
    use approx::assert_abs_diff_eq;
    use figures::FigureTrait;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;
    const TOL: f64 = 1e-9;

    fn session() -> Session {
        Session::new(RotviewConfig::default())
    }

    fn run(session: &mut Session, line: &str) -> Result<Outcome, RotviewErrors> {
        session.execute(parse_line(line).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("quat 1 0 -0.5 0").unwrap(),
            Command::Quaternion { w: 1.0, x: 0.0, y: -0.5, z: 0.0 }
        );
        assert_eq!(
            parse_line("axis-angle -90 0 0 1").unwrap(),
            Command::AxisAngle { angle: -90.0, x: 0.0, y: 0.0, z: 1.0 }
        );
        assert_eq!(
            parse_line("nudge yaw -2.5").unwrap(),
            Command::Nudge { axis: EulerAxis::Yaw, delta: -2.5 }
        );
        assert_eq!(
            parse_line("matrix 1 0 0 0 1 0 0 0 1").unwrap(),
            Command::Matrix { elements: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0] }
        );
        assert_eq!(parse_line("  status ").unwrap(), Command::Status);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_line("matrix 1 0 0 0 1 0 0 0").is_err());
        assert!(parse_line("euler 1 2").is_err());
        assert!(parse_line("euler a b c").is_err());
        assert!(parse_line("nudge sideways 1").is_err());
        assert!(parse_line("spin").is_err());
    }

    #[test]
    fn test_euler_input_in_degrees() {
        let mut session = session();
        let outcome = run(&mut session, "euler 90 0 0").unwrap();
        assert_eq!(outcome, Outcome::Updated(1));

        let m = session.shared.state().rotation_matrix().get_value();
        let expected = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0);
        assert_abs_diff_eq!(m, expected, epsilon = TOL);
    }

    #[test]
    fn test_angle_input_in_radians() {
        let config = RotviewConfig { angle_units: AngleUnits::Radians, ..Default::default() };
        let mut session = Session::new(config);
        run(&mut session, "axis-angle 1.5707963267948966 0 0 1").unwrap();
        assert_abs_diff_eq!(session.shared.state().euler_angles().yaw, FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn test_matrix_input_is_row_major() {
        let mut session = session();
        // yaw of 90 degrees
        run(&mut session, "matrix 0 -1 0 1 0 0 0 0 1").unwrap();
        let e = session.shared.state().euler_angles();
        assert_abs_diff_eq!(e.yaw, FRAC_PI_2, epsilon = TOL);
        assert_abs_diff_eq!(e.roll, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_rejected_input_keeps_state() {
        let mut session = session();
        run(&mut session, "euler 10 20 30").unwrap();
        let before = session.shared.snapshot();

        assert!(matches!(
            run(&mut session, "quat 0 0 0 0"),
            Err(RotviewErrors::Rotation(RotationErrors::Quaternion(
                QuaternionErrors::ZeroMagnitude
            )))
        ));
        assert!(matches!(
            run(&mut session, "matrix 1 0 0 0 1 0 0 0 -1"),
            Err(RotviewErrors::RotationMatrix(RotationMatrixError::Reflection(_)))
        ));
        assert!(matches!(
            run(&mut session, "matrix 2 0 0 0 1 0 0 0 1"),
            Err(RotviewErrors::RotationMatrix(RotationMatrixError::NotOrthonormal(_)))
        ));
        assert_eq!(session.shared.snapshot(), before);
    }

    #[test]
    fn test_nudge_is_clamped() {
        let mut session = session();
        run(&mut session, "nudge yaw 30").unwrap();
        assert_abs_diff_eq!(
            session.shared.state().euler_angles().yaw,
            5f64.to_radians(),
            epsilon = TOL
        );

        run(&mut session, "nudge yaw 2").unwrap();
        run(&mut session, "nudge roll -100").unwrap();
        let e = session.shared.state().euler_angles();
        assert_abs_diff_eq!(e.yaw, 7f64.to_radians(), epsilon = TOL);
        assert_abs_diff_eq!(e.roll, -5f64.to_radians(), epsilon = TOL);
        assert_abs_diff_eq!(e.pitch, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_nudge_pitch_through_vertical() {
        let mut session = session();
        run(&mut session, "euler 0 80 0").unwrap();
        for k in 1..=8 {
            run(&mut session, "nudge pitch 5").unwrap();
            let m = session.shared.state().rotation_matrix().get_value();
            let pitch = m[(0, 2)].atan2(m[(0, 0)]);
            assert_abs_diff_eq!(pitch, (80.0 + 5.0 * k as f64).to_radians(), epsilon = TOL);
        }

        let mut expected = RotationState::new();
        expected.set_from_euler_angles(0.0, 120f64.to_radians(), 0.0).unwrap();
        assert_abs_diff_eq!(
            session.shared.state().rotation_matrix().get_value(),
            expected.rotation_matrix().get_value(),
            epsilon = TOL
        );
    }

    #[test]
    fn test_nudge_after_other_input_starts_from_current_rotation() {
        let mut session = session();
        run(&mut session, "euler 0 80 0").unwrap();
        run(&mut session, "nudge pitch 5").unwrap();
        run(&mut session, "axis-angle 10 0 0 1").unwrap();
        run(&mut session, "nudge yaw 5").unwrap();

        let e = session.shared.state().euler_angles();
        assert_abs_diff_eq!(e.yaw, 15f64.to_radians(), epsilon = TOL);
        assert_abs_diff_eq!(e.pitch, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(e.roll, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_reset_and_random() {
        let mut session = session();
        run(&mut session, "random").unwrap();
        assert_abs_diff_eq!(
            session.shared.state().quaternion().get_value().mag(),
            1.0,
            epsilon = 1e-12
        );
        assert_eq!(run(&mut session, "reset").unwrap(), Outcome::Updated(2));
        assert_eq!(session.shared.state(), RotationState::new());
    }

    #[test]
    fn test_vector_input() {
        let mut session = session();
        run(&mut session, "vector 0 0 0").unwrap();
        assert_eq!(session.shared.state().quaternion(), UnitQuaternion::IDENTITY);

        run(&mut session, "vector 0 0.5 0").unwrap();
        assert_abs_diff_eq!(session.shared.state().euler_angles().pitch, 0.5, epsilon = TOL);
    }

    #[test]
    fn test_figure_switching() {
        let mut session = session();
        assert_eq!(session.figure.name(), "cube");

        let outcome = run(&mut session, "figure Pyramid").unwrap();
        assert_eq!(outcome, Outcome::Print("figure set to pyramid".to_string()));
        assert_eq!(session.figure.vertices().len(), 5);

        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../figures/resources/wedge.ron");
        run(&mut session, &format!("figure {path}")).unwrap();
        assert_eq!(session.figure.name(), "wedge");

        assert!(matches!(
            run(&mut session, "figure dodecahedron"),
            Err(RotviewErrors::UnknownFigure(_))
        ));
        assert!(matches!(
            run(&mut session, "figure missing.ron"),
            Err(RotviewErrors::Figure(_))
        ));
        assert_eq!(session.figure.name(), "wedge");
    }

    #[test]
    fn test_vertices_and_status_do_not_commit() {
        let mut session = session();
        run(&mut session, "euler 0 0 90").unwrap();
        let revision = session.shared.revision();

        let Outcome::Print(vertices) = run(&mut session, "vertices").unwrap() else {
            panic!("vertices should print");
        };
        assert_eq!(vertices.lines().count(), 8);

        assert!(matches!(run(&mut session, "status").unwrap(), Outcome::Print(_)));
        assert_eq!(session.shared.revision(), revision);

        // (1, -1, -1) yawed by 90 degrees
        let rotated = session.figure.rotated_vertices(&session.shared.state().quaternion());
        assert_abs_diff_eq!(rotated[0], Vector3::new(1.0, 1.0, -1.0), epsilon = TOL);
    }

    #[test]
    fn test_exit() {
        assert_eq!(run(&mut session(), "exit").unwrap(), Outcome::Exit);
    }
}
