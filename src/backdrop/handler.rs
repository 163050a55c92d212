//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `BackdropHandler` 只负责流程编排与配置管理。处理链路固定为：
//! 1. 读取配置快照
//! 2. 按来源加载原始字节
//! 3. 解码为 RGBA 位图
//! 4. 边缘取色
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<BackdropConfig>>` 支持运行时更新。
//! - 单次请求内使用“同一配置快照”，避免处理中途配置漂移。
//! - 记录 `load/decode/extract/total` 阶段耗时，便于性能诊断。
//! - `extract_or_fallback` 吞掉任何加载/解码错误并回退默认结果，与图片加载失败时
//!   背景保持默认灰色的行为一致。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::loader::fetch_raw;
use super::{BackdropConfig, BackdropError, ImageSource};
use crate::edge_color::{Bitmap, EdgeColorExtractor, ExtractionResult};

/// 背景生成处理器。
pub struct BackdropHandler {
    pub(super) config: Arc<RwLock<BackdropConfig>>,
    extractor: EdgeColorExtractor,
}

impl BackdropHandler {
    /// 根据初始配置创建处理器。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::backdrop::{BackdropConfig, BackdropHandler};
    ///
    /// let handler = BackdropHandler::new(BackdropConfig::default())?;
    /// # Ok::<(), menu_backdrop::backdrop::BackdropError>(())
    /// ```
    pub fn new(config: BackdropConfig) -> Result<Self, BackdropError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            extractor: EdgeColorExtractor::new(),
        })
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次请求链路使用一致参数。
    pub fn config_snapshot(&self) -> Result<BackdropConfig, BackdropError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| BackdropError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 校验并替换当前配置，进行中的请求继续使用旧快照。
    pub fn update_config(&self, config: BackdropConfig) -> Result<(), BackdropError> {
        config.validate()?;

        let mut current = self
            .config
            .write()
            .map_err(|_| BackdropError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        *current = config;

        log::info!(
            "⚙️ 已更新背景配置（max_file_size={}, max_decoded_pixels={}, allow_private_network={}）",
            current.max_file_size,
            current.max_decoded_pixels,
            current.allow_private_network
        );

        Ok(())
    }

    /// 加载并解码任意来源，得到可读取像素的位图。
    pub async fn load_bitmap(&self, source: ImageSource) -> Result<Bitmap, BackdropError> {
        self.load_bitmap_with_hooks(source, || false).await
    }

    pub(super) async fn load_bitmap_with_hooks<C>(
        &self,
        source: ImageSource,
        is_cancelled: C,
    ) -> Result<Bitmap, BackdropError>
    where
        C: Fn() -> bool + Send + Sync,
    {
        let config = self.config_snapshot()?;

        let load_start = Instant::now();
        let raw = fetch_raw(source, &config, &is_cancelled).await?;
        let load_elapsed = load_start.elapsed();

        if is_cancelled() {
            return Err(BackdropError::Cancelled("解码前请求已被取代".to_string()));
        }

        let decode_start = Instant::now();
        let bitmap = self.decode_bitmap(raw, &config)?;

        log::debug!(
            "⏱️ 加载阶段耗时 - load={}ms decode={}ms",
            load_elapsed.as_millis(),
            decode_start.elapsed().as_millis()
        );

        Ok(bitmap)
    }

    /// 处理主入口：加载、解码并提取边缘背景。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use menu_backdrop::backdrop::{BackdropConfig, BackdropHandler, ImageSource};
    ///
    /// # async fn demo() -> Result<(), menu_backdrop::backdrop::BackdropError> {
    /// let handler = BackdropHandler::new(BackdropConfig::default())?;
    /// let result = handler
    ///     .extract(ImageSource::FilePath("menu/bibimbap.png".into()))
    ///     .await?;
    /// println!("{}", result.dominant_color.css());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn extract(&self, source: ImageSource) -> Result<ExtractionResult, BackdropError> {
        self.extract_with_hooks(source, || false).await
    }

    pub(super) async fn extract_with_hooks<C>(
        &self,
        source: ImageSource,
        is_cancelled: C,
    ) -> Result<ExtractionResult, BackdropError>
    where
        C: Fn() -> bool + Send + Sync,
    {
        let total_start = Instant::now();
        let kind = source.kind();

        let bitmap = self.load_bitmap_with_hooks(source, &is_cancelled).await?;

        if is_cancelled() {
            return Err(BackdropError::Cancelled("取色前请求已被取代".to_string()));
        }

        let extract_start = Instant::now();
        let result = self.extractor.extract(&bitmap);
        let extract_elapsed = extract_start.elapsed();

        log::info!(
            "✅ 边缘背景提取完成 - 来源: {} 主色: {} 扁平化: {} extract={}ms total={}ms",
            kind,
            result.dominant_color.css(),
            result.is_flattened(),
            extract_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(result)
    }

    /// 与 `extract` 相同，但任何错误都回退为默认结果。
    pub async fn extract_or_fallback(&self, source: ImageSource) -> ExtractionResult {
        match self.extract(source).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("⚠️ 背景提取失败（{}），使用默认背景色：{}", err.code(), err);
                ExtractionResult::fallback()
            }
        }
    }

    pub fn extractor(&self) -> &EdgeColorExtractor {
        &self.extractor
    }
}
