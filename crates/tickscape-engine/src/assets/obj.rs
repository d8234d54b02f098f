use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;

/// Geometry read from a Wavefront OBJ file.
///
/// Faces are polygons of zero-based vertex indices. All objects and groups in
/// the file are merged; vertices no face refers to are dropped. Texture
/// coordinates, normals and materials are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
}

impl ModelData {
    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty model.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }

    fn from_models(models: &[tobj::Model]) -> Self {
        let mut data = ModelData::default();

        for model in models {
            let mesh = &model.mesh;
            let offset = data.vertices.len() as u32;

            data.vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );

            // No arities means every face is a triangle.
            let triangles;
            let arities: &[u32] = if mesh.face_arities.is_empty() {
                triangles = vec![3; mesh.indices.len() / 3];
                &triangles
            } else {
                &mesh.face_arities
            };

            let mut start = 0usize;
            for &arity in arities {
                let arity = arity as usize;
                let Some(face) = mesh.indices.get(start..start + arity) else {
                    log::warn!("{}: face runs past the index list", model.name);
                    break;
                };
                data.faces.push(face.iter().map(|i| i + offset).collect());
                start += arity;
            }
        }

        data
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Parses OBJ source text. Material libraries are not followed.
pub fn parse_obj(source: &str) -> Result<ModelData> {
    read_obj(&mut source.as_bytes()).context("invalid OBJ source")
}

/// Reads and parses an OBJ file.
pub fn load_obj(path: &Path) -> Result<ModelData> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_obj(&mut std::io::BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn read_obj<R: BufRead>(reader: &mut R) -> Result<ModelData> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;

    if models.len() > 1 {
        log::debug!("merging {} OBJ objects/groups", models.len());
    }
    Ok(ModelData::from_models(&models))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "\
# a triangle
o tri
v 0 0 0
v 1 0 0
v 0 1 0   # trailing comment
vn 0 0 1
f 1//1 2//1 3//1
";

    #[test]
    fn parses_vertices_and_faces() {
        let model = parse_obj(TRIANGLE).expect("triangle parses");
        assert_eq!(model.vertices.len(), 3);
        assert_eq!(model.vertices[2], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(model.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn quads_are_kept_whole() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf -4 -3 -2 -1\n";
        let model = parse_obj(src).expect("quad parses");
        assert_eq!(model.faces, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn groups_are_merged() {
        let src = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o b
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";
        let model = parse_obj(src).expect("two objects parse");
        assert_eq!(model.vertices.len(), 6);
        assert_eq!(model.faces, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn empty_source_is_empty_model() {
        let model = parse_obj("").expect("empty parses");
        assert!(model.vertices.is_empty());
        assert_eq!(model.bounds(), None);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let model = parse_obj("v -1 2 0\nv 3 -4 5\nv 0 0 0\nf 1 2 3\n").expect("parses");
        assert_eq!(
            model.bounds(),
            Some((Vec3::new(-1.0, -4.0, 0.0), Vec3::new(3.0, 2.0, 5.0)))
        );
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn bad_number_is_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid OBJ source");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_obj(Path::new("/definitely/not/here.obj")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.obj"));
    }
}
