//! 场景：对象列表与逐帧绘制流程

pub mod primitives;
pub mod scene_object;

use crate::core::renderer::Renderer;
use log::debug;
use scene_object::SceneObject;
use std::time::{Duration, Instant};

/// 一帧的统计信息
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// 所有批次中通过剔除的三角形总数
    pub triangles_rendered: usize,
    pub elapsed: Duration,
}

/// 按顺序绘制的对象集合
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn object_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn total_triangles(&self) -> usize {
        self.objects.iter().map(SceneObject::triangle_count).sum()
    }

    /// 根据相机更新矩阵、清空缓冲区，然后依次绘制所有对象
    pub fn render_frame(&self, renderer: &mut Renderer) -> FrameStats {
        let start = Instant::now();

        renderer.update_camera();
        renderer.clear_buffers();

        let triangles_rendered = self
            .objects
            .iter()
            .map(|object| {
                if object.outlined {
                    object.render_outlined(renderer)
                } else {
                    object.render(renderer)
                }
            })
            .sum();

        let stats = FrameStats {
            triangles_rendered,
            elapsed: start.elapsed(),
        };
        debug!(
            "帧渲染完成: {} 个对象，{} 个三角形，耗时 {:?}",
            self.objects.len(),
            stats.triangles_rendered,
            stats.elapsed
        );
        stats
    }
}
