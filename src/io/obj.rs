//! Wavefront OBJ format support.
//!
//! This module provides loading and saving of meshes in the OBJ format.
//! Besides vertices and triangulated faces, OBJ line elements (`l`) are
//! read and written, which is how wire bridge edges survive a round trip
//! through a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_triangles, to_face_vertex, EditMesh, MeshIndex, VertexId};

/// Load a mesh from an OBJ file.
///
/// Supports `v`, `f` (fan-triangulated for polygons, `v/vt/vn` references
/// accepted), and `l` statements; everything else is ignored.
///
/// # Example
///
/// ```no_run
/// use suture::io::obj;
/// use suture::mesh::EditMesh;
///
/// let mesh: EditMesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<EditMesh<I>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();
    let mut lines: Vec<Vec<usize>> = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords: Vec<f64> = parts.take(3).filter_map(|t| t.parse().ok()).collect();
                if coords.len() != 3 {
                    return Err(load_error(path, lineno, "malformed vertex"));
                }
                vertices.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let mut indices = Vec::new();
                for token in parts {
                    indices.push(parse_index(token, vertices.len()).ok_or_else(|| {
                        load_error(path, lineno, "malformed face index")
                    })?);
                }
                if indices.len() < 3 {
                    return Err(load_error(path, lineno, "face with fewer than 3 vertices"));
                }
                // Fan triangulation for polygons
                for i in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            Some("l") => {
                let mut indices = Vec::new();
                for token in parts {
                    indices.push(parse_index(token, vertices.len()).ok_or_else(|| {
                        load_error(path, lineno, "malformed line index")
                    })?);
                }
                if indices.len() >= 2 {
                    lines.push(indices);
                }
            }
            _ => {}
        }
    }

    if faces.is_empty() {
        return Err(MeshError::LoadError {
            path: path.to_path_buf(),
            message: "OBJ file contains no faces".to_string(),
        });
    }

    let mut mesh: EditMesh<I> = build_from_triangles(&vertices, &faces)?;

    // Polylines become chains of wire edges (unless the pair already exists)
    for polyline in &lines {
        for pair in polyline.windows(2) {
            mesh.insert_edge_if_absent(VertexId::new(pair[0]), VertexId::new(pair[1]));
        }
    }

    Ok(mesh)
}

/// Parse one OBJ index token (`7`, `7/1`, `7//3`, or `-1`) to a 0-based index.
fn parse_index(token: &str, num_vertices: usize) -> Option<usize> {
    let first = token.split('/').next()?;
    let value: i64 = first.parse().ok()?;
    let index = if value < 0 {
        // Negative indices count back from the most recent vertex
        num_vertices as i64 + value
    } else {
        value - 1
    };
    if index < 0 || index as usize >= num_vertices {
        return None;
    }
    Some(index as usize)
}

fn load_error(path: &Path, lineno: usize, message: &str) -> MeshError {
    MeshError::LoadError {
        path: path.to_path_buf(),
        message: format!("line {}: {}", lineno + 1, message),
    }
}

/// Save a mesh to an OBJ file.
///
/// Faces are written as `f` statements; wire edges (bridge edges) as `l`
/// statements.
///
/// # Example
///
/// ```no_run
/// use suture::io::obj;
/// use suture::mesh::EditMesh;
///
/// let mesh: EditMesh = EditMesh::new();
/// obj::save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &EditMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let (vertices, faces) = to_face_vertex(mesh);

    writeln!(writer, "# Generated by suture")?;
    for v in &vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for f in &faces {
        writeln!(writer, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
    }
    for e in mesh.wire_edges() {
        let edge = mesh.edge(e);
        writeln!(writer, "l {} {}", edge.a.index() + 1, edge.b.index() + 1)?;
    }

    writer.flush()?;
    Ok(())
}
