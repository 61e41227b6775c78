use crate::core::vertex::Vertex;
use crate::geometry::math::{Vec2, Vec3};
use crate::io::error::{Error, Result};
use crate::material_system::color::splat;
use log::{debug, info, warn};
use std::io::BufRead;
use std::path::Path;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,   // 将所有面转换为三角形
        single_index: false, // 保持独立的索引以处理分开的纹理/法线坐标
        ignore_points: true, // 忽略点元素
        ignore_lines: true,  // 忽略线元素
    }
}

/// 加载 OBJ 文件并展开为三角形顶点列表
///
/// 每 3 个顶点构成一个三角形，可直接交给 `Renderer::process_vertices`。
/// MTL 材质被忽略，材质由场景配置提供。
pub fn load_obj<P: AsRef<Path>>(obj_path: P) -> Result<Vec<Vertex>> {
    let obj_path = obj_path.as_ref();
    info!("加载 OBJ 文件: {:?}", obj_path);

    let (models, materials) =
        tobj::load_obj(obj_path, &load_options()).map_err(|source| Error::Obj {
            path: obj_path.to_path_buf(),
            source,
        })?;

    if let Err(e) = materials {
        debug!("未加载 MTL 材质: {}", e);
    }

    let vertices = flatten_models(&models);
    info!(
        "OBJ 加载完成: {} 个网格，{} 个三角形",
        models.len(),
        vertices.len() / 3
    );
    Ok(vertices)
}

/// 从内存中的 OBJ 文本加载，忽略 `mtllib` 引用
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> Result<Vec<Vertex>> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|source| Error::Obj {
        path: "<memory>".into(),
        source,
    })?;

    Ok(flatten_models(&models))
}

fn flatten_models(models: &[tobj::Model]) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for model in models {
        let mesh = &model.mesh;

        if mesh.indices.is_empty() {
            debug!("跳过没有索引的网格 '{}'", model.name);
            continue;
        }

        let has_normals = !mesh.normals.is_empty() && !mesh.normal_indices.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty() && !mesh.texcoord_indices.is_empty();

        if !has_normals {
            warn!("网格 '{}' 缺少法线，使用零法线", model.name);
        }
        if !has_texcoords {
            warn!("网格 '{}' 缺少纹理坐标，使用 (0, 0)", model.name);
        }

        vertices.reserve(mesh.indices.len());
        for (i, &pos_idx) in mesh.indices.iter().enumerate() {
            let position = read_vec3(&mesh.positions, pos_idx).unwrap_or_else(Vec3::zeros);

            let normal = mesh
                .normal_indices
                .get(i)
                .and_then(|&n| read_vec3(&mesh.normals, n))
                .unwrap_or_else(Vec3::zeros);

            // OBJ 的 v 轴向上，纹理按行从上到下存储
            let uv = mesh
                .texcoord_indices
                .get(i)
                .and_then(|&t| {
                    let start = t as usize * 2;
                    mesh.texcoords
                        .get(start..start + 2)
                        .map(|tc| Vec2::new(tc[0], 1.0 - tc[1]))
                })
                .unwrap_or_else(Vec2::zeros);

            vertices.push(Vertex::new(position, splat(1.0), normal, uv));
        }
    }

    vertices
}

fn read_vec3(data: &[f32], index: u32) -> Option<Vec3> {
    let start = index as usize * 3;
    data.get(start..start + 3)
        .map(|v| Vec3::new(v[0], v[1], v[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_triangulated_into_two_triangles() {
        let vertices = load_obj_from_reader(&mut Cursor::new(QUAD)).unwrap();
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.normal == Vec3::z()));
        assert!(vertices.iter().all(|v| v.color == splat(1.0)));
    }

    #[test]
    fn v_coordinate_is_flipped() {
        let vertices = load_obj_from_reader(&mut Cursor::new(QUAD)).unwrap();
        let origin = vertices
            .iter()
            .find(|v| v.position == Vec3::zeros())
            .unwrap();
        assert_eq!(origin.uv, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn missing_attributes_default_to_zero() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let vertices = load_obj_from_reader(&mut Cursor::new(obj)).unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(vertices[1].normal, Vec3::zeros());
        assert_eq!(vertices[1].uv, Vec2::zeros());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, Error::Obj { .. }));
    }
}
