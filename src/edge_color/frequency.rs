//! # 色系频次表
//!
//! 按首次出现顺序记录每个色系的计数与原始 RGB 样本。
//! 排序使用稳定排序，因此计数相同时先出现的色系排在前面；
//! 桶内代表色同样按首次出现顺序裁决平局。

use std::collections::HashMap;

use serde::Serialize;

use super::{ColorBucket, RgbColor};

/// 排名结果中的一项。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: ColorBucket,
    pub count: usize,
}

#[derive(Debug, Clone)]
struct BucketTally {
    bucket: ColorBucket,
    samples: Vec<RgbColor>,
}

/// 边缘像素的色系频次表。
#[derive(Debug, Clone, Default)]
pub struct BucketFrequency {
    tallies: Vec<BucketTally>,
    positions: [Option<usize>; ColorBucket::ALL.len()],
}

impl BucketFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分类并记录一个像素，返回其所属色系。
    pub fn record(&mut self, color: RgbColor) -> ColorBucket {
        let bucket = ColorBucket::classify(color);

        let position = match self.positions[bucket.index()] {
            Some(position) => position,
            None => {
                self.tallies.push(BucketTally {
                    bucket,
                    samples: Vec::new(),
                });
                let position = self.tallies.len() - 1;
                self.positions[bucket.index()] = Some(position);
                position
            }
        };

        self.tallies[position].samples.push(color);
        bucket
    }

    pub fn count(&self, bucket: ColorBucket) -> usize {
        self.positions[bucket.index()]
            .map(|position| self.tallies[position].samples.len())
            .unwrap_or(0)
    }

    /// 出现过的不同色系数量。
    pub fn distinct_buckets(&self) -> usize {
        self.tallies.len()
    }

    pub fn total(&self) -> usize {
        self.tallies.iter().map(|tally| tally.samples.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// 按计数降序排列；计数相同保持首次出现顺序。
    pub fn ranked(&self) -> Vec<BucketCount> {
        let mut ranked: Vec<BucketCount> = self
            .tallies
            .iter()
            .map(|tally| BucketCount {
                bucket: tally.bucket,
                count: tally.samples.len(),
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// 频次最高的色系。
    pub fn most_frequent_bucket(&self) -> Option<ColorBucket> {
        self.ranked().first().map(|entry| entry.bucket)
    }

    /// 指定色系中出现次数最多的精确 RGB。
    pub fn most_frequent_color_in(&self, bucket: ColorBucket) -> Option<RgbColor> {
        let position = self.positions[bucket.index()]?;
        let samples = &self.tallies[position].samples;

        let mut order: Vec<(RgbColor, usize)> = Vec::new();
        let mut index: HashMap<RgbColor, usize> = HashMap::new();

        for color in samples {
            match index.get(color) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    index.insert(*color, order.len());
                    order.push((*color, 1));
                }
            }
        }

        let mut best: Option<(RgbColor, usize)> = None;
        for (color, count) in order {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((color, count));
            }
        }

        best.map(|(color, _)| color)
    }

    /// 主色：最高频色系内最高频的精确 RGB。
    pub fn dominant_color(&self) -> Option<RgbColor> {
        self.most_frequent_bucket()
            .and_then(|bucket| self.most_frequent_color_in(bucket))
    }
}
