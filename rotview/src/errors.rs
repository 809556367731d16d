use crate::config::ConfigErrors;
use figures::FigureErrors;
use rotations::prelude::{RotationErrors, RotationMatrixError};
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotviewErrors {
    #[error("{0}")]
    Config(#[from] ConfigErrors),
    #[error("{0}")]
    Figure(#[from] FigureErrors),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Rotation(#[from] RotationErrors),
    #[error("{0}")]
    RotationMatrix(#[from] RotationMatrixError),
    #[error("a matrix needs 9 elements, got {0}")]
    MatrixElements(usize),
    #[error("unknown figure '{0}', expected cube, tetrahedron, pyramid or a path to a .ron mesh")]
    UnknownFigure(String),
}
