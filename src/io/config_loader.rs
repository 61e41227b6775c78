use crate::core::blending::{BlendEquation, BlendOp};
use crate::core::renderer::{Renderer, TextureId};
use crate::geometry::camera::Camera;
use crate::geometry::math::Vec3;
use crate::io::error::{Error, Result};
use crate::io::obj_loader::load_obj;
use crate::io::texture_loader::load_texture;
use crate::material_system::color::{Color, rgba};
use crate::material_system::light::{Light, MAX_LIGHTS};
use crate::material_system::material::Material;
use crate::material_system::texture::TextureFiltering;
use crate::scene::Scene;
use crate::scene::primitives::Primitive;
use crate::scene::scene_object::SceneObject;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

fn to_vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn to_color(c: [f32; 4]) -> Color {
    rgba(c[0], c[1], c[2], c[3])
}

fn from_vec3(v: &Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

fn from_color(c: &Color) -> [f32; 4] {
    [c.x, c.y, c.z, c.w]
}

// ===== 配置结构 =====

/// 场景配置文件的完整内容
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub render: RenderSection,
    pub camera: CameraSection,
    #[serde(rename = "texture", skip_serializing_if = "Vec::is_empty")]
    pub textures: Vec<TextureEntry>,
    #[serde(rename = "object", skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectEntry>,
    #[serde(rename = "light", skip_serializing_if = "Vec::is_empty")]
    pub lights: Vec<LightEntry>,
}

/// `[render]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    pub width: usize,
    pub height: usize,
    pub clear_color: [f32; 4],
    pub backface_culling: bool,
    pub perspective_correct_depth: bool,
    pub show_light_markers: bool,
    pub blending: BlendingSection,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            backface_culling: false,
            perspective_correct_depth: false,
            show_light_markers: true,
            blending: BlendingSection::default(),
        }
    }
}

/// `[render.blending]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendingSection {
    pub enabled: bool,
    pub left: BlendOp,
    pub right: BlendOp,
    pub equation: BlendEquation,
}

impl Default for BlendingSection {
    fn default() -> Self {
        Self {
            enabled: false,
            left: BlendOp::SrcAlpha,
            right: BlendOp::OneMinusSrcAlpha,
            equation: BlendEquation::Add,
        }
    }
}

/// `[camera]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub position: [f32; 3],
    pub center: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: from_vec3(&camera.position),
            center: from_vec3(&camera.center),
            up: from_vec3(&camera.up),
            fov_degrees: camera.fov_y.to_degrees(),
            near: camera.near,
            far: camera.far,
        }
    }
}

/// `[[texture]]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureEntry {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<TextureFiltering>,
}

/// `[object.material]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSection {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub shininess: f32,
}

impl Default for MaterialSection {
    fn default() -> Self {
        let material = Material::default();
        Self {
            ambient: from_color(&material.ambient),
            diffuse: from_color(&material.diffuse),
            specular: from_color(&material.specular),
            shininess: material.shininess,
        }
    }
}

impl MaterialSection {
    pub fn to_material(&self) -> Material {
        Material::new(
            to_color(self.ambient),
            to_color(self.diffuse),
            to_color(self.specular),
            self.shininess,
        )
    }
}

/// `[[object]]`，网格来自 `obj` 文件或内置 `mesh`，二者必须且只能给出一个
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Primitive>,
    pub position: [f32; 3],
    pub rotation_degrees: [f32; 3],
    pub scaling: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub hidden: bool,
    pub outlined: bool,
    pub material: MaterialSection,
}

impl Default for ObjectEntry {
    fn default() -> Self {
        Self {
            name: "object".to_string(),
            obj: None,
            mesh: None,
            position: [0.0; 3],
            rotation_degrees: [0.0; 3],
            scaling: [1.0; 3],
            texture: None,
            hidden: false,
            outlined: false,
            material: MaterialSection::default(),
        }
    }
}

/// `[[light]]`，未给出的字段沿用该槽位的默认值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightEntry {
    pub slot: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular: Option<[f32; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_strength: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear_attenuation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadratic_attenuation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

impl LightEntry {
    fn apply_to(&self, light: &mut Light) {
        if let Some(enabled) = self.enabled {
            light.enabled = enabled;
        }
        if let Some(position) = self.position {
            light.position = to_vec3(position);
        }
        if let Some(ambient) = self.ambient {
            light.ambient = to_color(ambient);
        }
        if let Some(diffuse) = self.diffuse {
            light.diffuse = to_color(diffuse);
        }
        if let Some(specular) = self.specular {
            light.specular = to_color(specular);
        }
        if let Some(strength) = self.specular_strength {
            light.specular_strength = strength;
        }
        if let Some(linear) = self.linear_attenuation {
            light.linear_attenuation = linear;
        }
        if let Some(quadratic) = self.quadratic_attenuation {
            light.quadratic_attenuation = quadratic;
        }
        if let Some(radius) = self.radius {
            light.radius = radius;
        }
    }
}

// ===== 构建渲染器与场景 =====

impl SceneConfig {
    /// 只使用内置网格的示例场景：描边立方体、地面和一盏点光源
    pub fn example() -> Self {
        let render = RenderSection::default();
        let (width, height) = (render.width as f32, render.height as f32);

        Self {
            render,
            camera: CameraSection::default(),
            textures: Vec::new(),
            objects: vec![
                ObjectEntry {
                    name: "cube".to_string(),
                    mesh: Some(Primitive::Cube),
                    rotation_degrees: [30.0, 45.0, 0.0],
                    outlined: true,
                    material: MaterialSection {
                        ambient: [1.0, 0.3, 0.3, 1.0],
                        shininess: 32.0,
                        ..MaterialSection::default()
                    },
                    ..ObjectEntry::default()
                },
                ObjectEntry {
                    name: "floor".to_string(),
                    mesh: Some(Primitive::Quad),
                    position: [0.0, -1.0, 0.0],
                    rotation_degrees: [-90.0, 0.0, 0.0],
                    scaling: [4.0, 4.0, 1.0],
                    ..ObjectEntry::default()
                },
            ],
            lights: vec![LightEntry {
                slot: 0,
                enabled: Some(true),
                position: Some([width / 2.0, height / 4.0, 1.5]),
                ambient: Some([0.4, 0.4, 0.4, 1.0]),
                diffuse: Some([0.6, 0.6, 0.6, 1.0]),
                ..LightEntry::default()
            }],
        }
    }

    pub fn camera(&self) -> Result<Camera> {
        let c = &self.camera;
        if c.far <= c.near {
            return Err(Error::Config(format!(
                "相机远平面 ({}) 必须大于近平面 ({})",
                c.far, c.near
            )));
        }

        let mut camera = Camera::new(
            to_vec3(c.position),
            to_vec3(c.center),
            c.fov_degrees.to_radians(),
            c.near,
            c.far,
        );
        camera.up = to_vec3(c.up);
        Ok(camera)
    }

    /// 创建渲染器并加载纹理与网格，相对路径以 `base_dir` 为基准
    pub fn build(&self, base_dir: &Path) -> Result<(Renderer, Scene)> {
        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            return Err(Error::Config(format!(
                "渲染尺寸无效: {}x{}",
                r.width, r.height
            )));
        }

        let mut renderer = Renderer::new(r.width, r.height);
        renderer.set_clear_color(to_color(r.clear_color));
        renderer.set_backface_culling(r.backface_culling);
        renderer.set_perspective_correct_depth(r.perspective_correct_depth);
        renderer.set_show_light_markers(r.show_light_markers);
        renderer.set_blend_enabled(r.blending.enabled);
        renderer.set_blend_func(r.blending.left, r.blending.right, r.blending.equation);
        renderer.camera = self.camera()?;

        for entry in &self.lights {
            if entry.slot >= MAX_LIGHTS {
                return Err(Error::Config(format!(
                    "光源槽位 {} 超出范围 (最多 {} 个)",
                    entry.slot, MAX_LIGHTS
                )));
            }
            entry.apply_to(renderer.light_mut(entry.slot));
        }

        let mut textures: HashMap<&str, TextureId> = HashMap::new();
        for entry in &self.textures {
            let id = load_texture(&mut renderer, base_dir.join(&entry.path), entry.filtering)?;
            textures.insert(entry.name.as_str(), id);
        }

        let mut scene = Scene::new();
        for entry in &self.objects {
            let vertices = match (&entry.obj, entry.mesh) {
                (Some(path), None) => load_obj(base_dir.join(path))?,
                (None, Some(mesh)) => mesh.vertices(),
                _ => {
                    return Err(Error::Config(format!(
                        "对象 '{}' 必须指定 obj 或 mesh 中的一个",
                        entry.name
                    )));
                }
            };

            let texture = match &entry.texture {
                Some(name) => Some(*textures.get(name.as_str()).ok_or_else(|| {
                    Error::Config(format!("对象 '{}' 引用了未知纹理 '{}'", entry.name, name))
                })?),
                None => None,
            };

            let rotation = to_vec3(entry.rotation_degrees).map(f32::to_radians);
            let mut object = SceneObject::new(entry.name.clone(), vertices)
                .with_transform(to_vec3(entry.position), rotation, to_vec3(entry.scaling))
                .with_material(entry.material.to_material())
                .with_texture(texture);
            object.hidden = entry.hidden;
            object.outlined = entry.outlined;

            debug!(
                "对象 '{}': {} 个三角形",
                object.name,
                object.triangle_count()
            );
            scene.add_object(object);
        }

        info!(
            "场景构建完成: {}x{}，{} 个对象，{} 个纹理，{} 个三角形",
            r.width,
            r.height,
            scene.objects.len(),
            textures.len(),
            scene.total_triangles()
        );
        Ok((renderer, scene))
    }
}

/// TOML配置管理器
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<SceneConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<SceneConfig> {
        Ok(toml::from_str(content)?)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(config: &SceneConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(config)?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))
    }

    /// 写出示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::save_to_file(&SceneConfig::example(), path)
    }
}
