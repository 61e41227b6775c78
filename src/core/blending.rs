use crate::material_system::color::{Color, splat};
use serde::{Deserialize, Serialize};

/// 混合操作数选择器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendOp {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
}

/// 左右两项的合成方程
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendEquation {
    Add,
    /// left - right
    Subtract,
    /// right - left
    ReverseSubtract,
    Min,
    Max,
}

/// 源/目标颜色混合状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blending {
    pub enabled: bool,
    pub left_op: BlendOp,
    pub right_op: BlendOp,
    pub equation: BlendEquation,
}

impl Default for Blending {
    fn default() -> Self {
        Self {
            enabled: false,
            left_op: BlendOp::SrcAlpha,
            right_op: BlendOp::OneMinusSrcAlpha,
            equation: BlendEquation::Add,
        }
    }
}

impl Blending {
    pub fn set(&mut self, left_op: BlendOp, right_op: BlendOp, equation: BlendEquation) {
        self.left_op = left_op;
        self.right_op = right_op;
        self.equation = equation;
    }

    /// `dst` 为缓冲区中已有颜色，`src` 为新片元颜色
    pub fn combine(&self, dst: &Color, src: &Color) -> Color {
        let left = factor(self.left_op, dst, src).component_mul(src);
        let right = factor(self.right_op, dst, src).component_mul(dst);

        match self.equation {
            BlendEquation::Add => left + right,
            BlendEquation::Subtract => left - right,
            BlendEquation::ReverseSubtract => right - left,
            BlendEquation::Min => left.inf(&right),
            BlendEquation::Max => left.sup(&right),
        }
    }
}

fn factor(op: BlendOp, dst: &Color, src: &Color) -> Color {
    match op {
        BlendOp::Zero => splat(0.0),
        BlendOp::One => splat(1.0),
        BlendOp::SrcColor => *src,
        BlendOp::OneMinusSrcColor => splat(1.0) - src,
        BlendOp::DstColor => *dst,
        BlendOp::OneMinusDstColor => splat(1.0) - dst,
        BlendOp::SrcAlpha => splat(src.w),
        BlendOp::OneMinusSrcAlpha => splat(1.0 - src.w),
        BlendOp::DstAlpha => splat(dst.w),
        BlendOp::OneMinusDstAlpha => splat(1.0 - dst.w),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material_system::color::rgba;

    const EPS: f32 = 1e-6;

    fn blending(left: BlendOp, right: BlendOp, equation: BlendEquation) -> Blending {
        Blending {
            enabled: true,
            left_op: left,
            right_op: right,
            equation,
        }
    }

    #[test]
    fn one_zero_add_replaces_with_source() {
        let b = blending(BlendOp::One, BlendOp::Zero, BlendEquation::Add);
        let dst = rgba(0.2, 0.4, 0.6, 1.0);
        let src = rgba(0.9, 0.1, 0.3, 0.5);
        assert_eq!(b.combine(&dst, &src), src);
    }

    #[test]
    fn alpha_over() {
        let b = Blending {
            enabled: true,
            ..Blending::default()
        };
        let dst = rgba(0.0, 0.0, 1.0, 1.0);
        let src = rgba(1.0, 0.0, 0.0, 0.25);
        let expected = src * 0.25 + dst * 0.75;
        assert!((b.combine(&dst, &src) - expected).norm() < EPS);
    }

    #[test]
    fn subtract_orders() {
        let dst = rgba(0.5, 0.5, 0.5, 0.5);
        let src = rgba(0.75, 0.25, 1.0, 1.0);

        let sub = blending(BlendOp::One, BlendOp::One, BlendEquation::Subtract);
        assert!((sub.combine(&dst, &src) - (src - dst)).norm() < EPS);

        let rsub = blending(BlendOp::One, BlendOp::One, BlendEquation::ReverseSubtract);
        assert!((rsub.combine(&dst, &src) - (dst - src)).norm() < EPS);
    }

    #[test]
    fn min_and_max_are_per_channel() {
        let dst = rgba(0.5, 0.1, 0.9, 0.3);
        let src = rgba(0.2, 0.8, 0.9, 0.6);

        let min = blending(BlendOp::One, BlendOp::One, BlendEquation::Min);
        assert_eq!(min.combine(&dst, &src), rgba(0.2, 0.1, 0.9, 0.3));

        let max = blending(BlendOp::One, BlendOp::One, BlendEquation::Max);
        assert_eq!(max.combine(&dst, &src), rgba(0.5, 0.8, 0.9, 0.6));
    }

    #[test]
    fn color_factors_multiply_component_wise() {
        let b = blending(BlendOp::DstColor, BlendOp::Zero, BlendEquation::Add);
        let dst = rgba(0.5, 1.0, 0.0, 1.0);
        let src = rgba(0.5, 0.5, 0.5, 1.0);
        assert_eq!(b.combine(&dst, &src), rgba(0.25, 0.5, 0.0, 1.0));
    }

    #[test]
    fn disabled_by_default() {
        assert!(!Blending::default().enabled);
    }
}
