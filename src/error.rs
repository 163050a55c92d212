//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，把库内各层错误（`BackdropError`、I/O、配置、输出）
//! 收拢到 CLI 这一层，避免在入口处散落 `.map_err(|e| e.to_string())`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `BackdropError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，便于直接写入 JSON 报告。

use serde::Serialize;

use crate::backdrop::BackdropError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 背景生成链路错误（加载 / 解码 / 取色 / 编码）
    #[error("{0}")]
    Backdrop(#[from] BackdropError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置不可用
    #[error("配置错误: {0}")]
    Config(String),

    /// 报告输出失败
    #[error("输出失败: {0}")]
    Output(String),
}

impl AppError {
    /// 稳定错误码，背景链路错误沿用 `BackdropError::code`。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Backdrop(err) => err.code(),
            Self::Io(_) => "E_IO",
            Self::Config(_) => "E_CONFIG",
            Self::Output(_) => "E_OUTPUT",
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
