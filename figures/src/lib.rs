use std::fmt::Debug;

use nalgebra::Vector3;
use rotations::RotationTrait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cube;
pub mod mesh;
pub mod pyramid;
pub mod tetrahedron;

use cube::Cube;
use mesh::{Mesh, MeshErrors};
use pyramid::Pyramid;
use tetrahedron::Tetrahedron;

#[derive(Debug, Error)]
pub enum FigureErrors {
    #[error("{0}")]
    MeshErrors(#[from] MeshErrors),
}

/// RGBA face colors shared by the built-in figures.
pub const PALETTE: [[f32; 4]; 6] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
];

/// A polygon given by indices into the figure's vertex list,
/// wound counter-clockwise when seen from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub indices: Vec<usize>,
    pub color: [f32; 4],
}

pub trait FigureTrait: Debug + Sync + Send {
    fn vertices(&self) -> Vec<Vector3<f64>>;
    fn faces(&self) -> Vec<Face>;
    fn edges(&self) -> Vec<[usize; 2]>;
}

/// Built-in figures, used for configuration and command parsing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FigureKind {
    #[default]
    Cube,
    Tetrahedron,
    Pyramid,
}

/// The figure drawn by the viewer.
#[derive(Clone, Debug, PartialEq)]
pub enum Figure {
    Cube(Cube),
    Tetrahedron(Tetrahedron),
    Pyramid(Pyramid),
    Mesh(Mesh),
}

impl Default for Figure {
    fn default() -> Self {
        Figure::Cube(Cube)
    }
}

impl From<FigureKind> for Figure {
    fn from(kind: FigureKind) -> Self {
        match kind {
            FigureKind::Cube => Figure::Cube(Cube),
            FigureKind::Tetrahedron => Figure::Tetrahedron(Tetrahedron),
            FigureKind::Pyramid => Figure::Pyramid(Pyramid),
        }
    }
}

impl From<Mesh> for Figure {
    fn from(value: Mesh) -> Self {
        Figure::Mesh(value)
    }
}

impl Figure {
    pub fn name(&self) -> &str {
        match self {
            Figure::Cube(_) => "cube",
            Figure::Tetrahedron(_) => "tetrahedron",
            Figure::Pyramid(_) => "pyramid",
            Figure::Mesh(mesh) => &mesh.name,
        }
    }

    /// Vertices after applying the rotation, in the same order as `vertices`.
    /// This is what a renderer consumes once per frame.
    pub fn rotated_vertices<R: RotationTrait>(&self, rotation: &R) -> Vec<Vector3<f64>> {
        self.vertices()
            .iter()
            .map(|v| rotation.rotate(v))
            .collect()
    }
}

impl FigureTrait for Figure {
    fn vertices(&self) -> Vec<Vector3<f64>> {
        match self {
            Figure::Cube(figure) => figure.vertices(),
            Figure::Tetrahedron(figure) => figure.vertices(),
            Figure::Pyramid(figure) => figure.vertices(),
            Figure::Mesh(figure) => figure.vertices(),
        }
    }

    fn faces(&self) -> Vec<Face> {
        match self {
            Figure::Cube(figure) => figure.faces(),
            Figure::Tetrahedron(figure) => figure.faces(),
            Figure::Pyramid(figure) => figure.faces(),
            Figure::Mesh(figure) => figure.faces(),
        }
    }

    fn edges(&self) -> Vec<[usize; 2]> {
        match self {
            Figure::Cube(figure) => figure.edges(),
            Figure::Tetrahedron(figure) => figure.edges(),
            Figure::Pyramid(figure) => figure.edges(),
            Figure::Mesh(figure) => figure.edges(),
        }
    }
}

/// Builds faces from static index lists, coloring them from `PALETTE` in order.
pub(crate) fn colored_faces(faces: &[&[usize]]) -> Vec<Face> {
    faces
        .iter()
        .enumerate()
        .map(|(i, indices)| Face {
            indices: indices.to_vec(),
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}
