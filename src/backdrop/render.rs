//! # 展示策略模块
//!
//! ## 设计思路
//!
//! 把提取结果转换为可以直接交给界面层的样式描述，界面层不再关心位图细节。
//!
//! - 边缘模式：有合成背景时输出 PNG Data URL，并把底色设为 `transparent`；
//!   扁平化时只输出主色。
//! - 单色模式：永远不输出背景图，颜色优先使用调用方覆盖值。
//!
//! ## 实现思路
//!
//! 背景图编码失败不会中断展示，只记录警告并退化为纯色。

use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use serde::Serialize;
use std::io::Cursor;

use super::BackdropError;
use crate::edge_color::{Bitmap, ExtractionResult};

/// 背景展示模式。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// 使用合成的边缘背景图。
    #[default]
    EdgeBackground,
    /// 只使用纯色；`override_color` 为空时取主色。
    SingleColor { override_color: Option<String> },
}

/// 交给界面层的背景样式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackdropStyle {
    /// `data:image/png;base64,...`，无背景图时为 `None`。
    pub background_image: Option<String>,
    pub background_color: String,
}

impl BackdropStyle {
    fn flat(color: String) -> Self {
        Self {
            background_image: None,
            background_color: color,
        }
    }
}

/// 将位图编码为 PNG Data URL。
///
/// # 示例
/// ```rust
/// use image::Rgba;
/// use menu_backdrop::backdrop::encode_png_data_url;
/// use menu_backdrop::edge_color::Bitmap;
///
/// let bitmap = Bitmap::from_fn(2, 2, |_, _| Rgba([0, 0, 0, 255]))?;
/// let url = encode_png_data_url(&bitmap)?;
/// assert!(url.starts_with("data:image/png;base64,"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode_png_data_url(bitmap: &Bitmap) -> Result<String, BackdropError> {
    let mut cursor = Cursor::new(Vec::new());
    bitmap
        .as_rgba_image()
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| BackdropError::Encode(format!("PNG 编码失败：{}", e)))?;

    Ok(format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(cursor.into_inner())
    ))
}

/// 按展示模式生成样式。
pub fn style_for(result: &ExtractionResult, mode: &DisplayMode) -> BackdropStyle {
    let dominant = result.dominant_color.css();

    match mode {
        DisplayMode::SingleColor { override_color } => {
            BackdropStyle::flat(override_color.clone().unwrap_or(dominant))
        }
        DisplayMode::EdgeBackground => match &result.background_image {
            None => BackdropStyle::flat(dominant),
            Some(bitmap) => match encode_png_data_url(bitmap) {
                Ok(url) => BackdropStyle {
                    background_image: Some(url),
                    background_color: "transparent".to_string(),
                },
                Err(err) => {
                    log::warn!("⚠️ 背景图编码失败，退化为纯色：{}", err);
                    BackdropStyle::flat(dominant)
                }
            },
        },
    }
}
