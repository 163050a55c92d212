//! # 像素访问错误
//!
//! 这些错误只在像素读取阶段产生，`EdgeColorExtractor::extract_from` 会将其吞掉并回退默认结果，
//! 不会传播给调用方。

/// 读取位图像素失败的原因。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelError {
    #[error("位图尺寸为零：{width}x{height}")]
    ZeroSized { width: u32, height: u32 },

    #[error("像素缓冲长度不匹配：期望 {expected} 字节，实际 {actual} 字节")]
    BufferLength { expected: usize, actual: usize },

    /// 像素不可读（例如来源拒绝访问、解码失败）。
    #[error("像素不可读：{0}")]
    Unreadable(String),
}
