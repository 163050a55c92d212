//! # 服务层（按图片槽位管理请求）
//!
//! ## 设计思路
//!
//! 同一个图片元素（槽位）可能在上一次计算完成前就换了图片来源。
//! 旧请求的结果一旦晚到，会覆盖新图片的背景，所以每个槽位维护一个递增的“代数”：
//! 1. 新请求开始时领取新的代数，并记住自己的代数
//! 2. 加载/解码/取色之间反复检查代数是否仍是自己的
//! 3. 被取代的请求返回 `Ok(None)`，结果不会被发布
//!
//! ## 实现思路
//!
//! - 代数表使用 `Mutex<HashMap<String, u64>>`，锁中毒映射为 `ResourceLimit`，
//!   不会被当成“已被取代”静默吞掉。
//! - 代数取自服务级单调计数器，槽位释放后重新登记也不会与旧请求撞号。
//! - 取消检查以闭包形式下传到 handler，与下载循环的取消钩子共用一条路径。

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{BackdropConfig, BackdropError, BackdropHandler, BackdropStyle, DisplayMode, ImageSource};
use super::render::style_for;

/// 背景服务：处理器 + 槽位代数表。
pub struct BackdropService {
    handler: BackdropHandler,
    slots: Mutex<HashMap<String, u64>>,
    next_generation: AtomicU64,
}

impl BackdropService {
    /// 使用默认配置创建服务。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::backdrop::BackdropService;
    ///
    /// let service = BackdropService::new()?;
    /// assert!(!service.cancel_slot("menu-1")?);
    /// # Ok::<(), menu_backdrop::backdrop::BackdropError>(())
    /// ```
    pub fn new() -> Result<Self, BackdropError> {
        Self::with_config(BackdropConfig::default())
    }

    pub fn with_config(config: BackdropConfig) -> Result<Self, BackdropError> {
        let handler = BackdropHandler::new(config)?;
        Ok(Self {
            handler,
            slots: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(1),
        })
    }

    pub fn handler(&self) -> &BackdropHandler {
        &self.handler
    }

    /// 为槽位计算背景样式。
    ///
    /// 返回 `Ok(None)` 表示该请求已被同一槽位的更新请求取代。
    /// 加载失败时返回错误，调用方可自行决定是否回退默认样式。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use menu_backdrop::backdrop::{BackdropService, DisplayMode, ImageSource};
    ///
    /// # async fn demo() -> Result<(), menu_backdrop::backdrop::BackdropError> {
    /// let service = BackdropService::new()?;
    /// if let Some(style) = service
    ///     .render_slot(
    ///         "menu-42",
    ///         ImageSource::Url("https://example.com/menu/42.jpg".into()),
    ///         &DisplayMode::EdgeBackground,
    ///     )
    ///     .await?
    /// {
    ///     println!("{}", style.background_color);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn render_slot(
        &self,
        slot: &str,
        source: ImageSource,
        mode: &DisplayMode,
    ) -> Result<Option<BackdropStyle>, BackdropError> {
        let generation = self.begin(slot)?;
        let is_superseded = || !matches!(self.is_current(slot, generation), Ok(true));

        let outcome = self
            .handler
            .extract_with_hooks(source, &is_superseded)
            .await
            .map(|result| style_for(&result, mode));

        self.publish(slot, generation, outcome)
    }

    /// 只有仍是槽位最新代数的请求才能发布结果（成功或失败）。
    fn publish(
        &self,
        slot: &str,
        generation: u64,
        outcome: Result<BackdropStyle, BackdropError>,
    ) -> Result<Option<BackdropStyle>, BackdropError> {
        if !self.is_current(slot, generation)? {
            log::debug!("⏭️ 槽位 {} 第 {} 代请求已被取代，丢弃结果", slot, generation);
            return Ok(None);
        }

        outcome.map(Some)
    }

    /// 取代槽位上正在进行的请求；返回槽位是否存在。
    pub fn cancel_slot(&self, slot: &str) -> Result<bool, BackdropError> {
        let mut guard = self.lock_slots()?;

        match guard.get_mut(slot) {
            Some(generation) => {
                *generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
                log::info!("🛑 已取消槽位 {} 的背景计算", slot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 忘记槽位（例如图片元素被移除）。进行中的请求随之失效。
    pub fn release_slot(&self, slot: &str) -> Result<(), BackdropError> {
        self.lock_slots()?.remove(slot);
        Ok(())
    }

    fn begin(&self, slot: &str) -> Result<u64, BackdropError> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        self.lock_slots()?.insert(slot.to_string(), generation);
        Ok(generation)
    }

    fn is_current(&self, slot: &str, generation: u64) -> Result<bool, BackdropError> {
        Ok(self.lock_slots()?.get(slot) == Some(&generation))
    }

    fn lock_slots(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, u64>>, BackdropError> {
        self.slots
            .lock()
            .map_err(|_| BackdropError::ResourceLimit("槽位代数表锁已中毒".to_string()))
    }
}
