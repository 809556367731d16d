use super::{Face, FigureTrait, colored_faces};
use nalgebra::Vector3;

/// Cube with corners at (+-1, +-1, +-1).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cube;

const VERTICES: [[f64; 3]; 8] = [
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [0, 3],
    [0, 4],
    [2, 1],
    [2, 3],
    [2, 7],
    [6, 3],
    [6, 4],
    [6, 7],
    [5, 1],
    [5, 4],
    [5, 7],
];

const FACES: [&[usize]; 6] = [
    &[3, 2, 1, 0], // back
    &[6, 7, 2, 3], // left
    &[4, 5, 7, 6], // front
    &[0, 1, 5, 4], // right
    &[2, 7, 5, 1], // top
    &[6, 3, 0, 4], // bottom
];

impl FigureTrait for Cube {
    fn vertices(&self) -> Vec<Vector3<f64>> {
        VERTICES.iter().map(|v| Vector3::from(*v)).collect()
    }

    fn faces(&self) -> Vec<Face> {
        colored_faces(&FACES)
    }

    fn edges(&self) -> Vec<[usize; 2]> {
        EDGES.to_vec()
    }
}
