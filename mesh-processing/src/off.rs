/// OFF mesh output.
use crate::obj::{Face, ObjMesh};
use constants::format::OFF_HEADER;
use std::io::{self, Write};
use std::iter;

/// Lazily renders `mesh` as OFF lines: header, counts, vertices, faces.
/// Face indices are shifted from 1-based to 0-based.
pub fn off_lines(mesh: &ObjMesh) -> impl Iterator<Item = String> + '_ {
    iter::once(OFF_HEADER.to_string())
        .chain(iter::once(format!(
            "{} {} 0",
            mesh.vertex_count(),
            mesh.face_count()
        )))
        .chain(mesh.vertices.iter().map(|v| v.coordinate_text()))
        .chain(mesh.faces.iter().map(face_line))
}

fn face_line(face: &Face) -> String {
    let mut line = face.arity().to_string();
    for index in &face.indices {
        line.push(' ');
        line.push_str(&(index - 1).to_string());
    }
    line
}

/// Streams the OFF rendering of `mesh` into `writer`.
pub fn write_off<W: Write>(mesh: &ObjMesh, mut writer: W) -> io::Result<()> {
    for line in off_lines(mesh) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj;

    const CUBE: &str = "\
# unit cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    #[test]
    fn test_cube_header_and_counts() {
        let mesh = parse_obj(CUBE).unwrap();
        let lines: Vec<String> = off_lines(&mesh).collect();
        assert_eq!(lines[0], "OFF");
        assert_eq!(lines[1], "8 6 0");
        assert_eq!(lines.len(), 2 + 8 + 6);
    }

    #[test]
    fn test_cube_indices_are_decremented() {
        let mesh = parse_obj(CUBE).unwrap();
        let lines: Vec<String> = off_lines(&mesh).collect();
        assert_eq!(lines[2], "0 0 0");
        assert_eq!(lines[9], "0 1 1");
        assert_eq!(lines[10], "4 0 3 2 1");
        assert_eq!(lines[15], "4 3 0 4 7");
    }

    #[test]
    fn test_every_face_index_is_input_minus_one() {
        let mesh = parse_obj(CUBE).unwrap();
        let lines: Vec<String> = off_lines(&mesh).skip(2 + 8).collect();
        for (face, line) in mesh.faces.iter().zip(&lines) {
            let fields: Vec<usize> = line
                .split_whitespace()
                .map(|f| f.parse().unwrap())
                .collect();
            assert_eq!(fields[0], face.arity());
            let expected: Vec<usize> = face.indices.iter().map(|i| i - 1).collect();
            assert_eq!(&fields[1..], expected.as_slice());
        }
    }

    #[test]
    fn test_mixed_arity_faces() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 2 0\nf 1 2 3\nf 1 2 3 4 5\n";
        let mesh = parse_obj(text).unwrap();
        let mut out = Vec::new();
        write_off(&mesh, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("OFF\n5 2 0\n"));
        assert!(out.ends_with("3 0 1 2\n5 0 1 2 3 4\n"));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = parse_obj("# nothing\n").unwrap();
        let lines: Vec<String> = off_lines(&mesh).collect();
        assert_eq!(lines, vec!["OFF".to_string(), "0 0 0".to_string()]);
    }
}
