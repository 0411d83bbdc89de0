/// Splitting of an OBJ mesh into one compact mesh per `o` object.
use crate::error::{Error, Result};
use crate::obj::{
    Face, ObjLine, Vertex, check_face_indices, obj_lines, parse_face, parse_vertex,
};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

/// Faces and material of one named object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMesh {
    pub id: String,
    /// The `usemtl` record following the object header, verbatim.
    pub material: Option<String>,
    pub faces: Vec<Face>,
}

impl ObjectMesh {
    /// Name of the file this object is written to.
    pub fn file_name(&self) -> String {
        format!("{}.obj", self.id)
    }
}

/// Object ids become file names, so they must name a single plain file.
fn object_id(line: &ObjLine<'_>) -> Result<String> {
    let id = line.fields.join(" ");
    if id.is_empty() {
        return Err(Error::malformed(line.number, "object record without name"));
    }
    if id == "." || id == ".." || id.contains(['/', '\\', '\0']) {
        return Err(Error::malformed(
            line.number,
            format!("object name '{}' is not a valid file name", id),
        ));
    }
    Ok(id)
}

/// Objects of one document plus the tables they index into.
#[derive(Debug, Clone)]
pub struct ObjectSplit {
    pub mtllib: Option<String>,
    pub vertices: Vec<Vertex>,
    pub objects: Vec<ObjectMesh>,
}

impl ObjectSplit {
    /// Renders one object with only the vertices its faces reference,
    /// renumbered from 1 in ascending order of their original index.
    pub fn render(&self, object: &ObjectMesh) -> String {
        let referenced: BTreeSet<usize> = object
            .faces
            .iter()
            .flat_map(|f| f.indices.iter().copied())
            .collect();
        let remap: HashMap<usize, usize> = referenced
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new + 1))
            .collect();

        let mut out = String::new();
        if let Some(mtllib) = &self.mtllib {
            let _ = writeln!(out, "{}", mtllib);
        }
        for &index in &referenced {
            let [x, y, z] = self.vertices[index - 1].position;
            let _ = writeln!(out, "v {:.2} {:.2} {:.2}", x, y, z);
        }
        let _ = writeln!(out, "o {}", object.id);
        if let Some(material) = &object.material {
            let _ = writeln!(out, "{}", material);
        }
        for face in &object.faces {
            out.push('f');
            for index in &face.indices {
                let _ = write!(out, " {}", remap[index]);
            }
            out.push('\n');
        }
        out
    }
}

/// Groups faces under the closest preceding `o` record.
pub fn split_by_object(text: &str) -> Result<ObjectSplit> {
    let mut split = ObjectSplit {
        mtllib: None,
        vertices: Vec::new(),
        objects: Vec::new(),
    };

    for line in obj_lines(text) {
        match line.tag {
            "mtllib" if split.mtllib.is_none() => {
                split.mtllib = Some(line.raw.trim_end().to_string());
            }
            "v" => split.vertices.push(parse_vertex(&line)?),
            "o" => split.objects.push(ObjectMesh {
                id: object_id(&line)?,
                material: None,
                faces: Vec::new(),
            }),
            "usemtl" => {
                if let Some(object) = split.objects.last_mut() {
                    if object.material.is_none() {
                        object.material = Some(line.raw.trim_end().to_string());
                    }
                }
            }
            "f" => {
                let face = parse_face(&line)?;
                let object = split.objects.last_mut().ok_or(Error::Sequencing {
                    line: line.number,
                    expected: "o",
                })?;
                object.faces.push(face);
            }
            _ => {}
        }
    }

    for object in &split.objects {
        check_face_indices(&object.faces, split.vertices.len())?;
    }

    Ok(split)
}
