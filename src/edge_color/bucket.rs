//! # 色系分桶
//!
//! ## 设计思路
//!
//! 将任意 RGB 像素确定性地归入 11 个色系之一。先用通道极差判断无彩色，
//! 再用 HSL 的饱和度/亮度兜底无彩色，最后按色相区间划分有彩色。
//!
//! 所有阈值均为经验值，保持不变以确保结果兼容。

use serde::Serialize;

use super::RgbColor;

/// RGB 通道极差低于该值视为无彩色。
const ACHROMATIC_CHANNEL_DIFF: u8 = 30;
/// 无彩色平均亮度分界。
const ACHROMATIC_DARK_AVG: f64 = 80.0;
const ACHROMATIC_LIGHT_AVG: f64 = 180.0;
/// 饱和度低于该值视为无彩色（百分比）。
const LOW_SATURATION: f64 = 15.0;
const LOW_SATURATION_DARK: f64 = 30.0;
const LOW_SATURATION_LIGHT: f64 = 70.0;
/// 极亮/极暗（百分比）。
const EXTREME_LIGHT: f64 = 90.0;
const EXTREME_DARK: f64 = 10.0;

/// 色系桶。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBucket {
    Black,
    White,
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Magenta,
}

impl ColorBucket {
    pub const ALL: [ColorBucket; 11] = [
        ColorBucket::Black,
        ColorBucket::White,
        ColorBucket::Gray,
        ColorBucket::Red,
        ColorBucket::Orange,
        ColorBucket::Yellow,
        ColorBucket::Green,
        ColorBucket::Cyan,
        ColorBucket::Blue,
        ColorBucket::Purple,
        ColorBucket::Magenta,
    ];

    /// 将像素归入色系。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::edge_color::{ColorBucket, RgbColor};
    ///
    /// assert_eq!(ColorBucket::classify(RgbColor::new(90, 90, 90)), ColorBucket::Gray);
    /// assert_eq!(ColorBucket::classify(RgbColor::new(220, 30, 30)), ColorBucket::Red);
    /// ```
    pub fn classify(color: RgbColor) -> Self {
        let RgbColor { r, g, b } = color;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        if max - min < ACHROMATIC_CHANNEL_DIFF {
            let avg = (r as f64 + g as f64 + b as f64) / 3.0;
            if avg < ACHROMATIC_DARK_AVG {
                return Self::Black;
            }
            if avg > ACHROMATIC_LIGHT_AVG {
                return Self::White;
            }
            return Self::Gray;
        }

        let (h, s, l) = rgb_to_hsl(color);

        if s < LOW_SATURATION {
            if l < LOW_SATURATION_DARK {
                return Self::Black;
            }
            if l > LOW_SATURATION_LIGHT {
                return Self::White;
            }
            return Self::Gray;
        }

        if l > EXTREME_LIGHT {
            return Self::White;
        }
        if l < EXTREME_DARK {
            return Self::Black;
        }

        Self::from_hue(h)
    }

    fn from_hue(h: f64) -> Self {
        if h >= 345.0 || (0.0..15.0).contains(&h) {
            Self::Red
        } else if (15.0..45.0).contains(&h) {
            Self::Orange
        } else if (45.0..75.0).contains(&h) {
            Self::Yellow
        } else if (75.0..150.0).contains(&h) {
            Self::Green
        } else if (150.0..210.0).contains(&h) {
            Self::Cyan
        } else if (210.0..270.0).contains(&h) {
            Self::Blue
        } else if (270.0..315.0).contains(&h) {
            Self::Purple
        } else if (315.0..345.0).contains(&h) {
            Self::Magenta
        } else {
            Self::Gray
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Magenta => "magenta",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// 标准 RGB → HSL 转换。
///
/// 返回 `(h, s, l)`：`h ∈ [0, 360)`，`s, l ∈ [0, 100]`。
pub fn rgb_to_hsl(color: RgbColor) -> (f64, f64, f64) {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;
    let l = (max + min) / 2.0;

    let mut h = 0.0;
    let mut s = 0.0;

    if diff != 0.0 {
        s = if l > 0.5 {
            diff / (2.0 - max - min)
        } else {
            diff / (max + min)
        };

        h = if max == r {
            ((g - b) / diff + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / diff + 2.0) / 6.0
        } else {
            ((r - g) / diff + 4.0) / 6.0
        };
    }

    (h * 360.0, s * 100.0, l * 100.0)
}
