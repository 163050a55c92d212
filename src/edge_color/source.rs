//! # 像素读取能力
//!
//! 提取算法只依赖“能拿到一张已解码位图”这一能力，不关心像素来自文件、网络还是内存。
//! 读取失败（来源拒绝访问、尺寸为零等）以 `PixelError` 表达，由提取器统一回退。

use image::{DynamicImage, RgbaImage};

use super::{Bitmap, PixelError};

/// 可读取 RGBA 像素的来源。
pub trait PixelSource {
    fn read_pixels(&self) -> Result<Bitmap, PixelError>;
}

impl PixelSource for Bitmap {
    fn read_pixels(&self) -> Result<Bitmap, PixelError> {
        Ok(self.clone())
    }
}

impl PixelSource for RgbaImage {
    fn read_pixels(&self) -> Result<Bitmap, PixelError> {
        Bitmap::from_rgba_image(self.clone())
    }
}

impl PixelSource for DynamicImage {
    fn read_pixels(&self) -> Result<Bitmap, PixelError> {
        Bitmap::from_rgba_image(self.to_rgba8())
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn read_pixels(&self) -> Result<Bitmap, PixelError> {
        (**self).read_pixels()
    }
}
