//! # 解码流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA 位图”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低恶意输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 按加载阶段确认的格式读取 header 尺寸
//! 2. 按像素/内存上限快速拒绝
//! 3. 完整解码
//! 4. 转换 RGBA 并包装为 `Bitmap`

use image::{GenericImageView, ImageReader};
use std::io::Cursor;

use super::source::RawImageData;
use super::{BackdropConfig, BackdropError, BackdropHandler};
use crate::edge_color::Bitmap;

impl BackdropHandler {
    /// 将原始字节解码为 RGBA 位图。
    pub(crate) fn decode_bitmap(
        &self,
        raw: RawImageData,
        config: &BackdropConfig,
    ) -> Result<Bitmap, BackdropError> {
        let (header_width, header_height) = Self::header_dimensions(&raw)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory_with_format(&raw.bytes, raw.format)
            .map_err(|e| BackdropError::Decode(format!("{:?} 解码失败：{}", raw.format, e)))?;

        let (width, height) = decoded.dimensions();
        Self::validate_pixel_limits(config, width, height)?;
        Self::validate_decoded_memory_limits(config, width, height)?;

        let bitmap = Bitmap::from_rgba_image(decoded.to_rgba8())?;

        log::info!(
            "✅ 图片解码成功 - 来源: {} 格式: {:?} 尺寸: {}x{}",
            raw.origin,
            raw.format,
            width,
            height
        );

        Ok(bitmap)
    }

    /// 只解析图片头拿到宽高，用于完整解码前的限制检查。
    fn header_dimensions(raw: &RawImageData) -> Result<(u32, u32), BackdropError> {
        ImageReader::with_format(Cursor::new(&raw.bytes), raw.format)
            .into_dimensions()
            .map_err(|e| BackdropError::Decode(format!("无法读取 {:?} 图片尺寸：{}", raw.format, e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(config: &BackdropConfig, width: u32, height: u32) -> Result<(), BackdropError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| BackdropError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(BackdropError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &BackdropConfig,
        width: u32,
        height: u32,
    ) -> Result<(), BackdropError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| BackdropError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(BackdropError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }
}
