//! # 边缘取色模块（edge_color）
//!
//! ## 设计思路
//!
//! 菜单图片通常不会铺满展示容器，容器剩余区域需要一个“看起来属于这张图”的背景。
//! 本模块只读取图片最左列与最右列像素，完成两件事：
//!
//! 1. 用左右边缘像素拼出一张固定尺寸（400×120）的双色背景图；
//! 2. 按色系分桶统计边缘像素，选出代表色（主色）。
//!
//! 若边缘色系过于分散，则丢弃拼接背景，只保留主色作为纯色背景（“扁平化”）。
//!
//! ## 实现思路
//!
//! - `bitmap`：位图与边缘列模型（基于 `image::RgbaImage`）
//! - `bucket`：RGB → HSL 与色系分桶规则
//! - `frequency`：色系频次表（保持首次出现顺序，用于平局裁决）
//! - `extractor`：完整提取流程与扁平化判定
//! - `source`：像素读取能力抽象（`PixelSource`）
//! - `error`：像素访问错误
//!
//! 整个模块是纯计算：不做 I/O、不缓存、不修改输入。
//!
//! ```text
//! Bitmap ──► EdgeColumn(左/右)
//!              ├─► synthesize_background ──► 400×120 Bitmap
//!              └─► ColorBucket::classify ──► BucketFrequency
//!                                              ├─► should_flatten
//!                                              └─► dominant_color
//! ```

mod bitmap;
mod bucket;
mod error;
mod extractor;
mod frequency;
mod source;

pub use bitmap::{Bitmap, EdgeColumn, EdgeSide, RgbColor};
pub use bucket::{rgb_to_hsl, ColorBucket};
pub use error::PixelError;
pub use extractor::{
    EdgeAnalysis, EdgeColorExtractor, ExtractionResult, BACKGROUND_HEIGHT, BACKGROUND_WIDTH,
    FALLBACK_COLOR,
};
pub use frequency::{BucketCount, BucketFrequency};
pub use source::PixelSource;
