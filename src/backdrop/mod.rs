//! # 背景生成模块（backdrop）
//!
//! ## 设计思路
//!
//! 该模块把“图片来源识别 → 加载校验 → 解码 → 边缘取色 → 展示样式”
//! 按职责拆分为多个子模块，取色算法本身放在 `edge_color`，这里只做外围链路。
//!
//! - `service`：按槽位管理请求，丢弃被取代的结果
//! - `handler`：编排整条处理流水线
//! - `loader`：负责 URL/Base64/文件加载与安全校验
//! - `pipeline`：负责解码与像素/内存限制
//! - `render`：把提取结果转换为展示样式
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! 调用方（CLI / 界面层）
//!    ↓
//! service.rs（槽位代数、取代判定）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + URL/体积安全校验）
//!    ├─ pipeline.rs（解码 + 像素限制）
//!    └─ edge_color（边缘取色）
//!    ↓
//! render.rs（BackdropStyle）
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod render;
mod service;
mod source;

pub use config::BackdropConfig;
pub use error::BackdropError;
pub use handler::BackdropHandler;
pub use render::{encode_png_data_url, style_for, BackdropStyle, DisplayMode};
pub use service::BackdropService;
pub use source::ImageSource;
