use super::{Face, FigureTrait, PALETTE};
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshErrors {
    #[error("a mesh needs at least 4 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("face {0} has fewer than 3 vertices")]
    DegenerateFace(usize),
    #[error("face {face} references vertex {index}, but the mesh only has {count}")]
    IndexOutOfRange { face: usize, index: usize, count: usize },
    #[error("vertex {0} is not finite")]
    NonFinite(usize),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// On-disk layout of a mesh file.
#[derive(Debug, Serialize, Deserialize)]
struct MeshFile {
    #[serde(default)]
    name: Option<String>,
    vertices: Vec<[f64; 3]>,
    faces: Vec<Vec<usize>>,
}

/// A user supplied polyhedron. Edges are derived from the face outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: String,
    vertices: Vec<Vector3<f64>>,
    faces: Vec<Vec<usize>>,
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vector3<f64>>,
        faces: Vec<Vec<usize>>,
    ) -> Result<Self, MeshErrors> {
        if vertices.len() < 4 {
            return Err(MeshErrors::TooFewVertices(vertices.len()));
        }
        if let Some(i) = vertices.iter().position(|v| !v.iter().all(|e| e.is_finite())) {
            return Err(MeshErrors::NonFinite(i));
        }
        for (face, indices) in faces.iter().enumerate() {
            if indices.len() < 3 {
                return Err(MeshErrors::DegenerateFace(face));
            }
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(MeshErrors::IndexOutOfRange { face, index, count: vertices.len() });
            }
        }
        Ok(Self { name: name.into(), vertices, faces })
    }

    /// Parses a mesh from RON text. `fallback_name` is used when the file has no `name`.
    pub fn from_ron_str(contents: &str, fallback_name: &str) -> Result<Self, MeshErrors> {
        let file: MeshFile = ron::from_str(contents)?;
        let vertices = file.vertices.into_iter().map(Vector3::from).collect();
        let name = file.name.unwrap_or_else(|| fallback_name.to_string());
        Self::new(name, vertices, file.faces)
    }

    /// Loads a mesh from a RON file, named after the file stem unless the file names it.
    pub fn from_ron_file(path: &Path) -> Result<Self, MeshErrors> {
        let contents = std::fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());
        let mesh = Self::from_ron_str(&contents, &stem)?;
        debug!(
            "loaded mesh '{}' from {}: {} vertices, {} faces",
            mesh.name,
            path.display(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }
}

impl FigureTrait for Mesh {
    fn vertices(&self) -> Vec<Vector3<f64>> {
        self.vertices.clone()
    }

    fn faces(&self) -> Vec<Face> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, indices)| Face {
                indices: indices.clone(),
                color: PALETTE[i % PALETTE.len()],
            })
            .collect()
    }

    fn edges(&self) -> Vec<[usize; 2]> {
        let mut edges = BTreeSet::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }
}
