//! # 菜单图片背景生成 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            调用方（菜单界面 / menu-backdrop CLI）         │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ BackdropStyle { background_image, background_color }
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕                                                  │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ backdrop ─── 来源加载·解码·槽位取代·展示样式           │
//! │  │   ├─ loader     URL/Base64/文件 + 安全校验             │
//! │  │   ├─ pipeline   解码 + 像素/内存限制                   │
//! │  │   ├─ service    槽位代数，丢弃过期结果                 │
//! │  │   └─ render     PNG Data URL / 纯色                    │
//! │  │                                                       │
//! │  └─ edge_color ─ 边缘取色算法（纯函数）                   │
//! │      ├─ bucket     RGB → HSL → 11 个色系                  │
//! │      ├─ frequency  色系/精确色计数                        │
//! │      └─ extractor  400×120 背景合成 + 扁平化判定          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，CLI 入口的返回类型 |
//! | [`edge_color`] | 从图片左右边缘列提取主色并合成延展背景 |
//! | [`backdrop`] | 从 URL/Base64/文件加载图片、解码、生成展示样式 |

pub mod backdrop;
pub mod edge_color;
pub mod error;
