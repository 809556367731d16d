use super::{Face, FigureTrait, colored_faces};
use nalgebra::Vector3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tetrahedron;

const VERTICES: [[f64; 3]; 4] = [
    [0.0, 1.0, 0.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [0.0, -1.0, -1.0],
];

const EDGES: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [2, 3], [3, 1]];

const FACES: [&[usize]; 4] = [&[0, 1, 2], &[0, 2, 3], &[0, 3, 1], &[1, 3, 2]];

impl FigureTrait for Tetrahedron {
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
