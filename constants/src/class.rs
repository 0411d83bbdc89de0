/// Semantic classes written by the terrain reconstruction as OBJ materials.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticClass {
    Building,
    Terrain,
    Road,
    Water,
    Forest,
    Separation,
    Bridge,
}

pub struct ClassInfo {
    pub class: SemanticClass,
    pub name: &'static str,
}

/// Output order of the per-class meshes.
pub const CLASS_MAP: &[ClassInfo] = &[
    ClassInfo {
        class: SemanticClass::Building,
        name: "Building",
    },
    ClassInfo {
        class: SemanticClass::Terrain,
        name: "Terrain",
    },
    ClassInfo {
        class: SemanticClass::Road,
        name: "Road",
    },
    ClassInfo {
        class: SemanticClass::Water,
        name: "Water",
    },
    ClassInfo {
        class: SemanticClass::Forest,
        name: "Forest",
    },
    ClassInfo {
        class: SemanticClass::Separation,
        name: "Separation",
    },
    ClassInfo {
        class: SemanticClass::Bridge,
        name: "Bridge",
    },
];

impl SemanticClass {
    pub const ALL: [SemanticClass; 7] = [
        SemanticClass::Building,
        SemanticClass::Terrain,
        SemanticClass::Road,
        SemanticClass::Water,
        SemanticClass::Forest,
        SemanticClass::Separation,
        SemanticClass::Bridge,
    ];

    /// Position of the class in `CLASS_MAP`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        CLASS_MAP[self.index()].name
    }

    /// Case-exact lookup of a material name in `CLASS_MAP`.
    pub fn from_name(name: &str) -> Option<SemanticClass> {
        CLASS_MAP.iter().find(|c| c.name == name).map(|c| c.class)
    }
}

impl fmt::Display for SemanticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
