//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载背景生成链路（加载 → 解码 → 取色 → 编码）中的所有错误来源。
//! 通过 `thiserror` 保持人类可读错误，同时提供稳定的 `code()` / `stage()`，
//! 便于调用方按分支处理或输出结构化报告。

use crate::edge_color::PixelError;

/// 背景生成统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    #[error("网络错误：{0}")]
    Network(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("超时错误：{0}")]
    Timeout(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("已取消：{0}")]
    Cancelled(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("像素读取失败：{0}")]
    Pixel(#[from] PixelError),
}

impl BackdropError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "E_NETWORK",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidFormat(_) => "E_INVALID_FORMAT",
            Self::FileSystem(_) => "E_FILE_SYSTEM",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
            Self::Cancelled(_) => "E_CANCELLED",
            Self::Encode(_) => "E_ENCODE",
            Self::Pixel(_) => "E_PIXEL",
        }
    }

    /// 出错阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::FileSystem(_) | Self::Cancelled(_) => "load",
            Self::InvalidFormat(_) => "validate",
            Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::Pixel(_) => "extract",
            Self::Encode(_) => "render",
        }
    }
}
