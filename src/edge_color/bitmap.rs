//! # 位图与边缘列模型
//!
//! ## 设计思路
//!
//! `Bitmap` 包装 `image::RgbaImage`，在构造时保证宽高均不为零、缓冲长度正确，
//! 之后的提取流程即可把“位图可读”当作前提，不再逐处判空。
//!
//! `EdgeColumn` 是从位图派生的只读视图：x=0（左）或 x=width-1（右）整列像素，按 y 递增排列。

use image::{Rgba, RgbaImage};
use serde::Serialize;

use super::PixelError;

/// 不含透明度的 RGB 颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 丢弃 alpha 通道。
    pub fn from_rgba(pixel: Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Self { r, g, b }
    }

    /// 输出 CSS 颜色字符串，例如 `rgb(209, 213, 219)`。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::edge_color::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(255, 0, 0).css(), "rgb(255, 0, 0)");
    /// ```
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// 边缘所在侧。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    Left,
    Right,
}

/// 单像素宽的边缘列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeColumn {
    side: EdgeSide,
    pixels: Vec<Rgba<u8>>,
}

impl EdgeColumn {
    pub fn side(&self) -> EdgeSide {
        self.side
    }

    pub fn pixels(&self) -> &[Rgba<u8>] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// 第 `y` 行像素；越界时取最后一行。
    pub(crate) fn at(&self, y: usize) -> Rgba<u8> {
        let index = y.min(self.pixels.len().saturating_sub(1));
        self.pixels[index]
    }
}

/// RGBA8 位图，行优先存储，宽高至少为 1。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    /// 从原始 RGBA 字节构造位图。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::edge_color::Bitmap;
    ///
    /// let bitmap = Bitmap::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255])?;
    /// assert_eq!(bitmap.dimensions(), (2, 1));
    /// # Ok::<(), menu_backdrop::edge_color::PixelError>(())
    /// ```
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, PixelError> {
        if width == 0 || height == 0 {
            return Err(PixelError::ZeroSized { width, height });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(4))
            .ok_or_else(|| PixelError::Unreadable("位图尺寸溢出".to_string()))?;
        let actual = pixels.len();
        if actual != expected {
            return Err(PixelError::BufferLength { expected, actual });
        }

        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or(PixelError::BufferLength { expected, actual })?;

        Ok(Self { image })
    }

    /// 包装已解码的 `RgbaImage`。
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self, PixelError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PixelError::ZeroSized { width, height });
        }
        Ok(Self { image })
    }

    /// 以函数逐像素生成位图。
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self, PixelError>
    where
        F: FnMut(u32, u32) -> Rgba<u8>,
    {
        if width == 0 || height == 0 {
            return Err(PixelError::ZeroSized { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_fn(width, height, f),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        self.image
    }

    /// 提取左或右边缘列。
    pub fn edge_column(&self, side: EdgeSide) -> EdgeColumn {
        let x = match side {
            EdgeSide::Left => 0,
            EdgeSide::Right => self.width() - 1,
        };

        let pixels = (0..self.height()).map(|y| self.pixel(x, y)).collect();

        EdgeColumn { side, pixels }
    }
}
