//! # 边缘取色提取器
//!
//! ## 设计思路
//!
//! 提取器是纯函数：同一位图多次调用得到完全相同的结果，每次都从头计算，不做缓存。
//! 任何像素读取失败或退化输入都回退为 `{ 无背景图, 默认灰色 }`，绝不向调用方抛错。
//!
//! ## 实现思路
//!
//! 1. 取左右边缘列
//! 2. 合成 400×120 背景：左半取左边缘、右半取右边缘，行按比例映射，alpha 固定 255
//! 3. 逐行（先左后右）分桶计数
//! 4. 判定是否扁平化：主色系占比 < 0.7，或主色系/次色系 < 2
//! 5. 选主色：最高频色系内最高频的精确 RGB

use image::{Rgba, RgbaImage};
use serde::Serialize;

use super::{
    Bitmap, BucketCount, BucketFrequency, EdgeColumn, EdgeSide, PixelError, PixelSource, RgbColor,
};

/// 合成背景宽度（像素）。
pub const BACKGROUND_WIDTH: u32 = 400;
/// 合成背景高度（像素）。
pub const BACKGROUND_HEIGHT: u32 = 120;
/// 无法取色时的默认灰色（`#d1d5db`）。
pub const FALLBACK_COLOR: RgbColor = RgbColor::new(209, 213, 219);

const DOMINANCE_RATIO_MIN: f64 = 0.7;
const FIRST_SECOND_RATIO_MIN: f64 = 2.0;

/// 一次提取的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// 合成背景；扁平化时为 `None`。
    pub background_image: Option<Bitmap>,
    pub dominant_color: RgbColor,
}

impl ExtractionResult {
    /// 读取失败时的安全结果。
    pub fn fallback() -> Self {
        Self {
            background_image: None,
            dominant_color: FALLBACK_COLOR,
        }
    }

    pub fn is_flattened(&self) -> bool {
        self.background_image.is_none()
    }
}

/// 提取过程的诊断信息。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeAnalysis {
    pub buckets: Vec<BucketCount>,
    pub total_samples: usize,
    /// 主色系占全部样本的比例；色系不足两个时为 `None`。
    pub dominance_ratio: Option<f64>,
    /// 主色系与次色系计数之比；色系不足两个时为 `None`。
    pub first_second_ratio: Option<f64>,
    pub flatten: bool,
    pub dominant_color: Option<RgbColor>,
}

/// 边缘取色提取器。
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeColorExtractor;

impl EdgeColorExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 从任意像素来源提取；读取失败时回退默认结果。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::edge_color::{Bitmap, EdgeColorExtractor, RgbColor};
    /// use image::Rgba;
    ///
    /// let bitmap = Bitmap::from_fn(8, 8, |_, _| Rgba([255, 0, 0, 255]))?;
    /// let result = EdgeColorExtractor::new().extract_from(&bitmap);
    ///
    /// assert!(result.background_image.is_some());
    /// assert_eq!(result.dominant_color, RgbColor::new(255, 0, 0));
    /// # Ok::<(), menu_backdrop::edge_color::PixelError>(())
    /// ```
    pub fn extract_from<S: PixelSource + ?Sized>(&self, source: &S) -> ExtractionResult {
        match source.read_pixels() {
            Ok(bitmap) => self.extract(&bitmap),
            Err(err) => {
                log::warn!("⚠️ 读取像素失败，使用默认背景色：{}", err);
                ExtractionResult::fallback()
            }
        }
    }

    /// 从已解码位图提取；退化输入回退默认结果。
    pub fn extract(&self, bitmap: &Bitmap) -> ExtractionResult {
        match self.try_extract(bitmap) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("⚠️ 边缘取色失败，使用默认背景色：{}", err);
                ExtractionResult::fallback()
            }
        }
    }

    fn try_extract(&self, bitmap: &Bitmap) -> Result<ExtractionResult, PixelError> {
        let left = bitmap.edge_column(EdgeSide::Left);
        let right = bitmap.edge_column(EdgeSide::Right);

        let background = Self::synthesize_background(&left, &right)?;
        let frequency = Self::tally(&left, &right);

        let Some(dominant_color) = frequency.dominant_color() else {
            return Err(PixelError::Unreadable("边缘没有可用样本".to_string()));
        };

        let analysis = Self::analysis_of(&frequency);
        log::debug!(
            "🎨 边缘色系分析 - 样本: {} 色系: {:?} 占比: {:?} 一二比: {:?} 扁平化: {}",
            analysis.total_samples,
            analysis.buckets,
            analysis.dominance_ratio,
            analysis.first_second_ratio,
            analysis.flatten
        );

        Ok(ExtractionResult {
            background_image: if analysis.flatten { None } else { Some(background) },
            dominant_color,
        })
    }

    /// 只做统计，不合成背景。
    pub fn analyze(&self, bitmap: &Bitmap) -> EdgeAnalysis {
        let left = bitmap.edge_column(EdgeSide::Left);
        let right = bitmap.edge_column(EdgeSide::Right);
        Self::analysis_of(&Self::tally(&left, &right))
    }

    /// 用左右边缘列合成固定尺寸背景。
    pub fn synthesize_background(left: &EdgeColumn, right: &EdgeColumn) -> Result<Bitmap, PixelError> {
        let source_height = left.len().min(right.len());
        if source_height == 0 {
            return Err(PixelError::ZeroSized {
                width: BACKGROUND_WIDTH,
                height: 0,
            });
        }

        let image = RgbaImage::from_fn(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, |x, y| {
            let mapped_y =
                ((y as f64 / BACKGROUND_HEIGHT as f64) * source_height as f64).floor() as usize;
            let column = if (x as f64 / BACKGROUND_WIDTH as f64) < 0.5 {
                left
            } else {
                right
            };

            let [r, g, b, _] = column.at(mapped_y).0;
            Rgba([r, g, b, 255])
        });

        Bitmap::from_rgba_image(image)
    }

    /// 逐行统计左右边缘像素（每行先左后右）。
    pub fn tally(left: &EdgeColumn, right: &EdgeColumn) -> BucketFrequency {
        let mut frequency = BucketFrequency::new();
        for (left_pixel, right_pixel) in left.pixels().iter().zip(right.pixels()) {
            frequency.record(RgbColor::from_rgba(*left_pixel));
            frequency.record(RgbColor::from_rgba(*right_pixel));
        }
        frequency
    }

    /// 色系是否过于分散，需改用纯色背景。
    pub fn should_flatten(frequency: &BucketFrequency) -> bool {
        Self::analysis_of(frequency).flatten
    }

    fn analysis_of(frequency: &BucketFrequency) -> EdgeAnalysis {
        let buckets = frequency.ranked();
        let total_samples = frequency.total();

        let (dominance_ratio, first_second_ratio) = match buckets.as_slice() {
            [first, second, ..] => (
                Some(first.count as f64 / total_samples as f64),
                Some(first.count as f64 / second.count.max(1) as f64),
            ),
            _ => (None, None),
        };

        let flatten = match (dominance_ratio, first_second_ratio) {
            (Some(dominance), Some(first_second)) => {
                dominance < DOMINANCE_RATIO_MIN || first_second < FIRST_SECOND_RATIO_MIN
            }
            _ => false,
        };

        EdgeAnalysis {
            buckets,
            total_samples,
            dominance_ratio,
            first_second_ratio,
            flatten,
            dominant_color: frequency.dominant_color(),
        }
    }
}
