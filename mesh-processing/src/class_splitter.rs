/// Partitioning of an annotated OBJ mesh into one mesh per semantic class.
use crate::error::{Error, Result};
use crate::obj::obj_lines;
use constants::SemanticClass;
use constants::format::mtllib_record;
use tracing::debug;

/// Parse state threaded through the face pass.
#[derive(Debug, Default)]
struct ParseContext {
    /// Class receiving faces, set by the last `usemtl` record.
    active_class: Option<SemanticClass>,
    /// Name from the last `o` record, written before the next `usemtl`.
    object_name: String,
}

/// Body lines written for one class after the shared vertex table.
#[derive(Debug, Default, Clone)]
struct ClassStream {
    lines: Vec<String>,
    face_count: usize,
}

/// Per-class meshes sharing one vertex table.
#[derive(Debug)]
pub struct ClassPartition {
    vertices: Vec<String>,
    streams: [ClassStream; 7],
}

impl ClassPartition {
    /// The shared vertex records, verbatim and in input order.
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Object headers, `usemtl` records and faces routed to `class`.
    pub fn body(&self, class: SemanticClass) -> &[String] {
        &self.streams[class.index()].lines
    }

    pub fn face_count(&self, class: SemanticClass) -> usize {
        self.streams[class.index()].face_count
    }

    /// Renders the OBJ document of one class: material library, the full
    /// vertex table, then the class body.
    pub fn render(&self, class: SemanticClass) -> String {
        let mut out = mtllib_record();
        out.push('\n');
        for line in self.vertices.iter().chain(self.body(class)) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Splits `text` into seven class meshes. Every face goes to the class
/// selected by the closest preceding `usemtl` record.
pub fn split_by_class(text: &str) -> Result<ClassPartition> {
    let vertices: Vec<String> = obj_lines(text)
        .filter(|line| line.tag == "v")
        .map(|line| line.raw.to_string())
        .collect();

    let mut streams: [ClassStream; 7] = Default::default();
    let mut ctx = ParseContext::default();

    for line in obj_lines(text) {
        match line.tag {
            "o" => {
                ctx.object_name = line.fields.join(" ");
            }
            "usemtl" => {
                let name = line.fields.first().ok_or_else(|| {
                    Error::malformed(line.number, "usemtl record without material name")
                })?;
                let class = SemanticClass::from_name(name).ok_or_else(|| {
                    Error::UnrecognizedClass {
                        line: line.number,
                        name: name.to_string(),
                    }
                })?;

                let stream = &mut streams[class.index()];
                if !ctx.object_name.is_empty() {
                    stream.lines.push(format!("o {}", ctx.object_name));
                }
                stream.lines.push(line.raw.to_string());
                ctx.active_class = Some(class);
            }
            "f" => {
                let class = ctx.active_class.ok_or(Error::Sequencing {
                    line: line.number,
                    expected: "usemtl",
                })?;
                let stream = &mut streams[class.index()];
                stream.lines.push(line.raw.to_string());
                stream.face_count += 1;
            }
            _ => {}
        }
    }

    for class in SemanticClass::ALL {
        debug!(
            class = class.name(),
            faces = streams[class.index()].face_count,
            "class partitioned"
        );
    }

    Ok(ClassPartition { vertices, streams })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOTATED: &str = "\
mtllib ./3dfier.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
o b1
usemtl Building
f 1 2 3
f 1 3 4
o t1
usemtl Terrain
f 2 3 4
o r1
usemtl Road
f 1 2 4
";

    #[test]
    fn test_every_face_lands_in_exactly_one_class() {
        let split = split_by_class(ANNOTATED).unwrap();
        let mut faces: Vec<&String> = SemanticClass::ALL
            .iter()
            .flat_map(|c| split.body(*c))
            .filter(|l| l.starts_with("f "))
            .collect();
        faces.sort();

        let mut expected: Vec<&str> = ANNOTATED.lines().filter(|l| l.starts_with("f ")).collect();
        expected.sort();
        assert_eq!(faces, expected);

        let total: usize = SemanticClass::ALL.iter().map(|c| split.face_count(*c)).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_every_class_gets_full_vertex_table() {
        let split = split_by_class(ANNOTATED).unwrap();
        for class in SemanticClass::ALL {
            let rendered = split.render(class);
            let vertices: Vec<&str> = rendered.lines().filter(|l| l.starts_with("v ")).collect();
            assert_eq!(vertices, vec!["v 0 0 0", "v 1 0 0", "v 1 1 0", "v 0 1 0"]);
            assert!(rendered.starts_with("mtllib ./3dfier.mtl\n"));
        }
        assert_eq!(split.face_count(SemanticClass::Water), 0);
    }

    #[test]
    fn test_object_name_precedes_usemtl() {
        let split = split_by_class(ANNOTATED).unwrap();
        assert_eq!(
            split.body(SemanticClass::Building),
            &["o b1", "usemtl Building", "f 1 2 3", "f 1 3 4"]
        );
        assert_eq!(
            split.render(SemanticClass::Road),
            "mtllib ./3dfier.mtl\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\no r1\nusemtl Road\nf 1 2 4\n"
        );
    }

    #[test]
    fn test_usemtl_without_object_writes_no_header() {
        let split = split_by_class("v 0 0 0\nusemtl Water\nf 1 1 1\n").unwrap();
        assert_eq!(split.body(SemanticClass::Water), &["usemtl Water", "f 1 1 1"]);
    }

    #[test]
    fn test_unknown_class_fails() {
        let err = split_by_class("v 0 0 0\nusemtl Vegetation\nf 1 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedClass { line: 2, ref name } if name == "Vegetation"
        ));
    }

    #[test]
    fn test_class_match_is_case_exact() {
        let err = split_by_class("usemtl building\n").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedClass { .. }));
    }

    #[test]
    fn test_face_before_usemtl_fails() {
        let err = split_by_class("v 0 0 0\no a\nf 1 1 1\n").unwrap_err();
        assert!(matches!(err, Error::Sequencing { line: 3, .. }));
    }
}
