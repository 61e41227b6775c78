use crate::core::renderer::{Renderer, TextureId};
use crate::core::stencil::StencilOp;
use crate::core::vertex::Vertex;
use crate::geometry::math::{Mat4, Vec3};
use crate::geometry::transform::TransformFactory;
use crate::material_system::material::Material;

/// 描边时放大副本的缩放倍数
pub const OUTLINE_SCALE: f32 = 1.05;

/// 场景中的一个对象：网格、变换、材质与可选纹理
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub position: Vec3,
    /// 欧拉角（弧度），按 Z·Y·X 顺序组合
    pub rotation: Vec3,
    pub scaling: Vec3,
    pub vertices: Vec<Vertex>,
    pub material: Material,
    pub texture: Option<TextureId>,
    pub hidden: bool,
    pub outlined: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scaling: Vec3::repeat(1.0),
            vertices,
            material: Material::default(),
            texture: None,
            hidden: false,
            outlined: false,
        }
    }

    pub fn with_transform(mut self, position: Vec3, rotation: Vec3, scaling: Vec3) -> Self {
        self.position = position;
        self.rotation = rotation;
        self.scaling = scaling;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn model_matrix(&self) -> Mat4 {
        TransformFactory::trs(&self.position, &self.rotation, &self.scaling)
    }

    /// 绑定纹理与材质并提交网格，返回通过剔除的三角形数
    pub fn render(&self, renderer: &mut Renderer) -> usize {
        if self.hidden {
            return 0;
        }

        renderer.bind_texture(self.texture);
        renderer.set_material(self.material);
        renderer.set_model_matrix(self.model_matrix());
        renderer.process_vertices(&self.vertices);
        renderer.triangles_rendered()
    }

    /// 模板描边：先正常绘制并写入模板，再去掉纹理、放大后只在模板外绘制
    ///
    /// 结束时模板测试被关闭。
    pub fn render_outlined(&self, renderer: &mut Renderer) -> usize {
        if self.hidden {
            return 0;
        }

        renderer.bind_texture(self.texture);
        renderer.set_material(self.material);
        renderer.set_model_matrix(self.model_matrix());

        renderer.set_stencil_state(true, StencilOp::Write);
        renderer.process_vertices(&self.vertices);
        let mut rendered = renderer.triangles_rendered();

        renderer.bind_texture(None);
        renderer.set_stencil_operation(StencilOp::Discard);
        renderer.set_model_matrix(TransformFactory::trs(
            &self.position,
            &self.rotation,
            &(self.scaling * OUTLINE_SCALE),
        ));
        renderer.process_vertices(&self.vertices);
        rendered += renderer.triangles_rendered();

        renderer.set_stencil_enabled(false);
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::primitives;

    #[test]
    fn model_matrix_applies_trs() {
        let object = SceneObject::new("quad", primitives::quad()).with_transform(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::zeros(),
            Vec3::repeat(2.0),
        );
        let p = object.model_matrix() * Vec3::new(0.5, 0.5, 0.0).push(1.0);
        assert_eq!(p.xyz(), Vec3::new(2.0, 3.0, 3.0));
    }

    #[test]
    fn hidden_objects_draw_nothing() {
        let mut renderer = Renderer::new(16, 16);
        let mut object = SceneObject::new("tri", primitives::triangle());
        object.hidden = true;
        assert_eq!(object.render(&mut renderer), 0);
        assert_eq!(object.render_outlined(&mut renderer), 0);
    }

    #[test]
    fn outline_pass_leaves_stencil_disabled() {
        let mut renderer = Renderer::new(16, 16);
        let object = SceneObject::new("tri", primitives::triangle());
        object.render_outlined(&mut renderer);
        assert!(!renderer.stencil_enabled());
        assert_eq!(renderer.bound_texture(), None);
    }
}
