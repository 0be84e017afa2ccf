//! Binary STL file loading.
//!
//! Layout: an 80-byte header (skipped, not validated), a little-endian
//! u32 triangle count, then one 50-byte record per triangle. The normal
//! stored in each record is discarded and recomputed from vertex winding,
//! so files with garbage normals still render correctly.
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use nom::{
    bytes::complete::take,
    multi::count,
    number::complete::{le_f32, le_u16, le_u32},
    IResult,
};

use crate::geometry::{Mesh, Triangle};
use crate::vec3::Vec3;

const HEADER_LEN: usize = 80;
const RECORD_LEN: usize = 50;

/// Failure to produce a mesh from an STL file.
///
/// The caller is expected to recover by continuing with an empty mesh;
/// a mesh is never partially populated.
#[derive(Debug)]
pub enum MeshLoadError {
    /// The file could not be read at all.
    Io(io::Error),
    /// The byte stream ended before the declared triangle records.
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::Io(err) => write!(f, "failed to read STL file: {}", err),
            MeshLoadError::Truncated { expected, actual } => write!(
                f,
                "STL file truncated: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshLoadError::Io(err) => Some(err),
            MeshLoadError::Truncated { .. } => None,
        }
    }
}

impl From<io::Error> for MeshLoadError {
    fn from(err: io::Error) -> Self {
        MeshLoadError::Io(err)
    }
}

/// Reads and parses a binary STL file in one blocking call.
pub fn load_stl(path: &Path) -> Result<Mesh, MeshLoadError> {
    let data = fs::read(path)?;
    parse_binary_stl(&data)
}

/// Parse binary STL bytes into a mesh.
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, MeshLoadError> {
    match parse_mesh(data) {
        Ok((_, mesh)) => Ok(mesh),
        Err(_) => Err(MeshLoadError::Truncated {
            expected: expected_len(data),
            actual: data.len(),
        }),
    }
}

/// Total byte length a well-formed file of the declared triangle count
/// would have: the 84-byte preamble plus 50 bytes per record.
fn expected_len(data: &[u8]) -> usize {
    if data.len() < HEADER_LEN + 4 {
        return HEADER_LEN + 4;
    }
    let declared = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    HEADER_LEN + 4 + declared * RECORD_LEN
}

fn parse_mesh(input: &[u8]) -> IResult<&[u8], Mesh> {
    let (input, _header) = take(HEADER_LEN)(input)?;
    let (input, triangle_count) = le_u32(input)?;
    let (input, triangles) = count(parse_record, triangle_count as usize)(input)?;

    let mut mesh = Mesh::with_capacity(triangles.len());
    for triangle in triangles {
        mesh.add_triangle(triangle);
    }

    Ok((input, mesh))
}

fn parse_record(input: &[u8]) -> IResult<&[u8], Triangle> {
    // Stored normal: present in the record but not trusted.
    let (input, _normal) = take(12usize)(input)?;
    let (input, vertices) = count(parse_vec3, 3)(input)?;
    let (input, _attribute) = le_u16(input)?;

    Ok((input, Triangle::new(vertices[0], vertices[1], vertices[2])))
}

fn parse_vec3(input: &[u8]) -> IResult<&[u8], Vec3> {
    let (input, x) = le_f32(input)?;
    let (input, y) = le_f32(input)?;
    let (input, z) = le_f32(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_count(triangle_count: u32) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&triangle_count.to_le_bytes());
        data
    }

    fn push_record(data: &mut Vec<u8>, normal: [f32; 3], vertices: [[f32; 3]; 3]) {
        for component in normal {
            data.extend_from_slice(&component.to_le_bytes());
        }
        for vertex in vertices {
            for component in vertex {
                data.extend_from_slice(&component.to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    #[test]
    fn test_parse_empty_mesh() {
        let data = file_with_count(0);
        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 0);
    }

    #[test]
    fn test_round_trip_ignores_stored_normal() {
        let mut data = file_with_count(1);
        push_record(
            &mut data,
            [9.0, 9.0, 9.0], // garbage stored normal
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 1);

        let triangle = &mesh.triangles[0];
        assert_eq!(triangle.vertices[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(triangle.vertices[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(triangle.vertices[2], Vec3::new(0.0, 1.0, 0.0));
        // Recomputed from winding, not read from the file.
        assert!((triangle.normal.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_exact_count() {
        let mut data = file_with_count(3);
        for i in 0..3 {
            let offset = i as f32;
            push_record(
                &mut data,
                [0.0, 0.0, 0.0],
                [
                    [offset, 0.0, 0.0],
                    [offset + 1.0, 0.0, 0.0],
                    [offset, 1.0, 0.0],
                ],
            );
        }

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 3);
        assert_eq!(mesh.triangles[2].vertices[0], Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_truncated_records_fail() {
        // Declares two triangles but carries only one record.
        let mut data = file_with_count(2);
        push_record(
            &mut data,
            [0.0, 0.0, 1.0],
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );

        match parse_binary_stl(&data) {
            Err(MeshLoadError::Truncated { expected, actual }) => {
                assert_eq!(expected, 84 + 2 * RECORD_LEN);
                assert_eq!(actual, 84 + RECORD_LEN);
            }
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn test_file_shorter_than_preamble_fails() {
        let data = vec![0u8; 40];
        assert!(matches!(
            parse_binary_stl(&data),
            Err(MeshLoadError::Truncated { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_stl(Path::new("definitely-not-here.stl"));
        assert!(matches!(result, Err(MeshLoadError::Io(_))));
    }
}
