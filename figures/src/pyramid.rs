use super::{Face, FigureTrait, colored_faces};
use nalgebra::Vector3;

/// Square pyramid, base on y = -1 and apex at (0, 1, 0).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pyramid;

const VERTICES: [[f64; 3]; 5] = [
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [0.0, 1.0, 0.0],
];

const EDGES: [[usize; 2]; 8] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 4],
    [2, 4],
    [3, 4],
];

const FACES: [&[usize]; 5] = [&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]];

impl FigureTrait for Pyramid {
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
