//! # 配置模块
//!
//! ## 设计思路
//!
//! 将加载与解码阶段的所有“可调策略”集中到 `BackdropConfig`，保证运行时行为可观测、可调整、可测试。
//! 取色算法本身的阈值不在此处：它们是兼容性契约，不允许调整。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置。
//! - 支持从 JSON 文件加载，缺失字段回落默认值（`#[serde(default)]`）。
//! - `validate` 对各项做范围校验，加载与运行时更新都会调用。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::BackdropError;

/// 背景生成配置。
///
/// 字段覆盖了下载与解码两个阶段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// 下载/读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 网络下载超时时间（秒）。
    pub download_timeout: u64,
    /// 建立连接（TCP/TLS）超时时间（秒）。
    pub connect_timeout: u64,
    /// 下载首包超时时间（毫秒）。
    pub stream_first_byte_timeout_ms: u64,
    /// 下载分块读取超时时间（毫秒）。
    pub stream_chunk_timeout_ms: u64,
    /// 最大重定向次数。
    pub max_redirects: usize,
    /// 是否允许访问内网或本地地址（默认关闭）。
    pub allow_private_network: bool,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            max_file_size: 20 * 1024 * 1024,
            download_timeout: 30,
            connect_timeout: 8,
            stream_first_byte_timeout_ms: 10_000,
            stream_chunk_timeout_ms: 15_000,
            max_redirects: 5,
            allow_private_network: false,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
        }
    }
}

impl BackdropConfig {
    /// 从 JSON 文件加载配置。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use menu_backdrop::backdrop::BackdropConfig;
    ///
    /// let config = BackdropConfig::load_from_path("backdrop.json")?;
    /// assert!(config.max_redirects <= 20);
    /// # Ok::<(), menu_backdrop::backdrop::BackdropError>(())
    /// ```
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, BackdropError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BackdropError::FileSystem(format!("无法读取配置文件 {}：{}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| BackdropError::InvalidFormat(format!("解析配置文件失败：{}", e)))?;
        config.validate()?;

        log::info!("⚙️ 已加载配置文件：{}", path.display());
        Ok(config)
    }

    /// 校验各项取值范围。
    pub fn validate(&self) -> Result<(), BackdropError> {
        if self.max_file_size < 1024 {
            return Err(BackdropError::InvalidFormat("max_file_size 不能小于 1KB".to_string()));
        }
        if !(1..=300).contains(&self.download_timeout) {
            return Err(BackdropError::InvalidFormat("download_timeout 必须在 1~300 秒之间".to_string()));
        }
        if !(1..=120).contains(&self.connect_timeout) {
            return Err(BackdropError::InvalidFormat("connect_timeout 必须在 1~120 秒之间".to_string()));
        }
        if !(500..=120_000).contains(&self.stream_first_byte_timeout_ms) {
            return Err(BackdropError::InvalidFormat(
                "stream_first_byte_timeout_ms 必须在 500~120000 毫秒之间".to_string(),
            ));
        }
        if !(500..=120_000).contains(&self.stream_chunk_timeout_ms) {
            return Err(BackdropError::InvalidFormat(
                "stream_chunk_timeout_ms 必须在 500~120000 毫秒之间".to_string(),
            ));
        }
        if self.max_redirects > 20 {
            return Err(BackdropError::InvalidFormat("max_redirects 不能大于 20".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(BackdropError::InvalidFormat("max_decoded_pixels 不能为 0".to_string()));
        }
        if self.max_decoded_bytes < 4 {
            return Err(BackdropError::InvalidFormat("max_decoded_bytes 不能小于 4 字节".to_string()));
        }

        Ok(())
    }
}
