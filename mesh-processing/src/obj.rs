/// Wavefront OBJ record parsing.
use crate::error::{Error, Result};

/// A non-empty, non-comment OBJ line split into its tag and fields.
#[derive(Debug, Clone)]
pub struct ObjLine<'a> {
    /// 1-based line number in the input.
    pub number: usize,
    pub raw: &'a str,
    pub tag: &'a str,
    pub fields: Vec<&'a str>,
}

/// Iterates the records of an OBJ document, skipping blank and `#` lines.
pub fn obj_lines(text: &str) -> impl Iterator<Item = ObjLine<'_>> {
    text.lines().enumerate().filter_map(|(idx, raw)| {
        if raw.starts_with('#') {
            return None;
        }
        let mut tokens = raw.split_whitespace();
        let tag = tokens.next()?;
        Some(ObjLine {
            number: idx + 1,
            raw,
            tag,
            fields: tokens.collect(),
        })
    })
}

/// Vertex with its coordinate text kept verbatim for re-emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub text: [String; 3],
    pub position: [f64; 3],
}

impl Vertex {
    /// `x y z` exactly as written in the input.
    pub fn coordinate_text(&self) -> String {
        self.text.join(" ")
    }
}

/// Polygon of 1-based vertex references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub line: usize,
    pub indices: Vec<usize>,
}

impl Face {
    pub fn arity(&self) -> usize {
        self.indices.len()
    }
}

/// Parses the x, y, z fields of a `v` record. Extra fields (w, colour) are ignored.
pub fn parse_vertex(line: &ObjLine<'_>) -> Result<Vertex> {
    if line.fields.len() < 3 {
        return Err(Error::malformed(
            line.number,
            format!(
                "vertex needs 3 coordinates, found {}",
                line.fields.len()
            ),
        ));
    }

    let mut position = [0.0; 3];
    for (slot, field) in position.iter_mut().zip(&line.fields) {
        *slot = field.parse::<f64>().map_err(|_| {
            Error::malformed(line.number, format!("invalid coordinate '{}'", field))
        })?;
    }

    Ok(Vertex {
        text: [
            line.fields[0].to_string(),
            line.fields[1].to_string(),
            line.fields[2].to_string(),
        ],
        position,
    })
}

/// Parses an `f` record whose fields are plain 1-based vertex indices.
pub fn parse_face(line: &ObjLine<'_>) -> Result<Face> {
    if line.fields.is_empty() {
        return Err(Error::malformed(line.number, "face without vertex indices"));
    }

    let indices = line
        .fields
        .iter()
        .map(|field| match field.parse::<usize>() {
            Ok(0) => Err(Error::malformed(
                line.number,
                "face index 0 (OBJ indices start at 1)",
            )),
            Ok(index) => Ok(index),
            Err(_) => Err(Error::malformed(
                line.number,
                format!("invalid face index '{}'", field),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Face {
        line: line.number,
        indices,
    })
}

/// Rejects faces pointing past the end of the vertex table.
pub fn check_face_indices(faces: &[Face], vertex_count: usize) -> Result<()> {
    for face in faces {
        if let Some(index) = face.indices.iter().find(|&&i| i > vertex_count) {
            return Err(Error::malformed(
                face.line,
                format!(
                    "face index {} exceeds vertex count {}",
                    index, vertex_count
                ),
            ));
        }
    }
    Ok(())
}

/// Vertices and faces of an OBJ document, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl ObjMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Collects `v` and `f` records; every other record type is ignored.
pub fn parse_obj(text: &str) -> Result<ObjMesh> {
    let mut mesh = ObjMesh::default();

    for line in obj_lines(text) {
        match line.tag {
            "v" => mesh.vertices.push(parse_vertex(&line)?),
            "f" => mesh.faces.push(parse_face(&line)?),
            _ => {}
        }
    }

    check_face_indices(&mesh.faces, mesh.vertices.len())?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_comments_and_other_records() {
        let text = "# exported\n\nmtllib a.mtl\nv 1 2 3\nvn 0 0 1\nvt 0.5 0.5\nusemtl Road\nf 1 1 1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_vertex_text_is_verbatim() {
        let mesh = parse_obj("v 1.000 -2.50 3e2\n").unwrap();
        assert_eq!(mesh.vertices[0].coordinate_text(), "1.000 -2.50 3e2");
        assert_eq!(mesh.vertices[0].position, [1.0, -2.5, 300.0]);
    }

    #[test]
    fn test_vertex_with_two_coordinates_fails() {
        let err = parse_obj("v 1 2\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_face_index_zero_fails() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 4, .. }));
    }

    #[test]
    fn test_non_numeric_face_token_fails() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 two 3\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 4, .. }));
    }

    #[test]
    fn test_face_index_past_vertex_table_fails() {
        let err = parse_obj("f 1 2 4\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap_err();
        assert!(matches!(err, Error::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_face_before_vertices_is_accepted() {
        let mesh = parse_obj("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        assert_eq!(mesh.faces[0].indices, vec![1, 2, 3]);
    }
}
