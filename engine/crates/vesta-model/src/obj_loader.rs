use crate::error::ModelError;
use crate::importer::CornerStream;
use crate::model::Model;
use crate::vertex::Vertex;
use std::path::Path;

/// 读取 OBJ 文件，文件中的所有 mesh 合并为一个模型，模型名称为文件名（不含扩展名）
///
/// position/normal/uv 使用各自独立的索引读取，每个 corner 都展开为完整的顶点，
/// 然后交给 [`crate::importer::import`] 去重。缺失的法线记为 0，缺失的 UV 记为 0。
pub fn load_obj(obj_file: impl AsRef<Path>) -> Result<Model, ModelError> {
    let obj_file = obj_file.as_ref();
    let (meshes, materials) = tobj::load_obj(
        obj_file,
        &tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ignore_lines: true,
            ignore_points: true,
            ..Default::default()
        },
    )
    .map_err(|source| ModelError::Load {
        path: obj_file.to_path_buf(),
        source,
    })?;

    // 材质不在这里处理，只记录一下
    if let Err(e) = materials {
        log::debug!("ignore materials of {:?}: {}", obj_file, e);
    }

    let corner_cnt: usize = meshes.iter().map(|m| m.mesh.indices.len()).sum();
    let mut corners = CornerStream::with_capacity(corner_cnt);
    for mesh in &meshes {
        expand_corners(&mesh.mesh, &mut corners)
            .map_err(|e| ModelError::malformed(format!("mesh '{}' in {:?}: {}", mesh.name, obj_file, e)))?;
    }

    let name = obj_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "unnamed".to_string());
    corners.import(name)
}

fn expand_corners(mesh: &tobj::Mesh, corners: &mut CornerStream) -> Result<(), ModelError> {
    for (i, &pos_index) in mesh.indices.iter().enumerate() {
        let position = fetch::<3>(&mesh.positions, pos_index, "position")?;
        let normal = match mesh.normal_indices.get(i) {
            Some(&normal_index) => fetch::<3>(&mesh.normals, normal_index, "normal")?,
            None => [0.0; 3],
        };
        // OBJ 的 v 轴朝上，纹理的 v 轴朝下
        let uv = match mesh.texcoord_indices.get(i) {
            Some(&uv_index) => {
                let [u, v] = fetch::<2>(&mesh.texcoords, uv_index, "texcoord")?;
                [u, 1.0 - v]
            }
            None => [0.0; 2],
        };

        corners.push(Vertex::new(position, normal, uv));
    }

    Ok(())
}

fn fetch<const N: usize>(data: &[f32], index: u32, attribute: &str) -> Result<[f32; N], ModelError> {
    let start = index as usize * N;
    data.get(start..start + N)
        .and_then(|s| <[f32; N]>::try_from(s).ok())
        .ok_or_else(|| {
            ModelError::malformed(format!(
                "{attribute} index {index} is out of range ({} values)",
                data.len() / N
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_OBJ: &str = "\
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_load_quad() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        fs::write(&path, QUAD_OBJ).unwrap();

        let model = load_obj(&path).unwrap();

        assert_eq!(model.name(), "quad");
        assert_eq!(model.vertices().len(), 4);
        assert_eq!(model.indices().len(), 6);
        assert!(model.validate().is_ok());
        assert!(model.vertices().iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        // 第一个顶点的 uv 被翻转
        assert_eq!(model.vertices()[0].uv, [0.0, 1.0]);
        assert_eq!(model.aabb().half_extent, glam::Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_load_without_normals_and_uvs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let model = load_obj(&path).unwrap();

        assert_eq!(model.vertices().len(), 3);
        assert!(model.vertices().iter().all(|v| v.normal == [0.0; 3] && v.uv == [0.0; 2]));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_obj(dir.path().join("missing.obj")).unwrap_err();

        assert!(matches!(err, ModelError::Load { .. }));
    }

    #[test]
    fn test_fetch_out_of_range() {
        let data = [0.0f32; 6];

        assert_eq!(fetch::<3>(&data, 1, "position").unwrap(), [0.0; 3]);
        assert!(matches!(
            fetch::<3>(&data, 2, "position"),
            Err(ModelError::MalformedGeometry { .. })
        ));
    }
}
