use serde::{Deserialize, Serialize};

/// 模板操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StencilOp {
    /// 无条件将掩码置 1，从不丢弃
    #[default]
    Write,
    /// 掩码非零处丢弃颜色写入，不修改掩码
    Discard,
}

/// 与颜色/深度缓冲区同尺寸的逐像素掩码
pub struct Stencil {
    enabled: bool,
    operation: StencilOp,
    width: usize,
    buffer: Vec<f32>,
}

impl Stencil {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            enabled: false,
            operation: StencilOp::Write,
            width,
            buffer: vec![0.0; width * height],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn operation(&self) -> StencilOp {
        self.operation
    }

    pub fn set_operation(&mut self, operation: StencilOp) {
        self.operation = operation;
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        self.buffer[y * self.width + x]
    }

    /// 执行当前模板操作，返回该片元的颜色写入是否应被丢弃
    pub fn test_and_apply(&mut self, x: usize, y: usize) -> bool {
        if !self.enabled {
            return false;
        }

        let offset = y * self.width + x;
        match self.operation {
            StencilOp::Write => {
                self.buffer[offset] = 1.0;
                false
            }
            StencilOp::Discard => self.buffer[offset] != 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_never_discards_or_writes() {
        let mut stencil = Stencil::new(4, 4);
        stencil.set_operation(StencilOp::Write);
        assert!(!stencil.test_and_apply(1, 1));
        assert_eq!(stencil.value(1, 1), 0.0);
    }

    #[test]
    fn write_marks_then_discard_rejects() {
        let mut stencil = Stencil::new(4, 4);
        stencil.set_enabled(true);
        assert!(!stencil.test_and_apply(2, 3));
        assert_eq!(stencil.value(2, 3), 1.0);

        stencil.set_operation(StencilOp::Discard);
        assert!(stencil.test_and_apply(2, 3));
        assert!(!stencil.test_and_apply(0, 0));
        // Discard 不修改掩码
        assert_eq!(stencil.value(0, 0), 0.0);
    }

    #[test]
    fn clear_zeroes_the_mask() {
        let mut stencil = Stencil::new(2, 2);
        stencil.set_enabled(true);
        stencil.test_and_apply(1, 1);
        stencil.clear();
        assert_eq!(stencil.value(1, 1), 0.0);
    }
}
