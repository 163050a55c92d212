//! # 菜单图片背景生成 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与报告输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use image::ImageFormat;
use serde::Serialize;

use menu_backdrop::backdrop::{
    style_for, BackdropConfig, BackdropError, BackdropHandler, BackdropStyle, DisplayMode, ImageSource,
};
use menu_backdrop::edge_color::{EdgeAnalysis, ExtractionResult, RgbColor};
use menu_backdrop::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// 合成边缘背景图
    Edge,
    /// 只输出纯色
    Single,
}

/// 为菜单图片生成延展背景，每个来源输出一行 JSON 报告。
#[derive(Parser, Debug)]
#[command(name = "menu-backdrop", author, version, about)]
struct Args {
    /// 图片来源：http(s) URL、data URL 或本地路径
    #[arg(required = true)]
    sources: Vec<String>,

    /// 展示模式
    #[arg(long, value_enum, default_value_t = ModeArg::Edge)]
    mode: ModeArg,

    /// 单色模式下覆盖背景色（任意 CSS 颜色）
    #[arg(long)]
    color: Option<String>,

    /// JSON 配置文件，缺失字段使用默认值
    #[arg(long)]
    config: Option<PathBuf>,

    /// 在报告中附带色系统计
    #[arg(long)]
    analysis: bool,

    /// 将合成背景另存为 PNG 到该目录
    #[arg(long, value_name = "DIR")]
    write_background: Option<PathBuf>,

    /// 格式化输出 JSON
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn display_mode(&self) -> DisplayMode {
        match self.mode {
            ModeArg::Edge => DisplayMode::EdgeBackground,
            ModeArg::Single => DisplayMode::SingleColor {
                override_color: self.color.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct DominantColorReport {
    css: String,
    rgb: RgbColor,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    code: &'static str,
    stage: &'static str,
    message: String,
}

impl From<&BackdropError> for ErrorReport {
    fn from(err: &BackdropError) -> Self {
        Self {
            code: err.code(),
            stage: err.stage(),
            message: err.to_string(),
        }
    }
}

impl ErrorReport {
    /// 背景图落盘失败只影响当前来源。
    fn output(err: &AppError) -> Self {
        Self {
            code: err.code(),
            stage: "output",
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SourceReport {
    source: String,
    kind: &'static str,
    dominant_color: DominantColorReport,
    flattened: bool,
    style: BackdropStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<EdgeAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(err) = run(args).await {
        log::error!("❌ 运行失败（{}）：{}", err.code(), err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config = match &args.config {
        Some(path) => BackdropConfig::load_from_path(path).map_err(|e| AppError::Config(e.to_string()))?,
        None => BackdropConfig::default(),
    };
    let handler = BackdropHandler::new(config)?;
    let mode = args.display_mode();

    if let Some(dir) = &args.write_background {
        fs::create_dir_all(dir)?;
    }

    for (index, input) in args.sources.iter().enumerate() {
        let report = process_source(&handler, input, index, &mode, &args).await;
        print_report(&report, args.pretty)?;
    }

    Ok(())
}

async fn process_source(
    handler: &BackdropHandler,
    input: &str,
    index: usize,
    mode: &DisplayMode,
    args: &Args,
) -> SourceReport {
    let source = ImageSource::detect(input);
    let label = source.label();
    let kind = source.kind();

    let (result, analysis, mut error) = match handler.load_bitmap(source).await {
        Ok(bitmap) => {
            let extractor = handler.extractor();
            let analysis = args.analysis.then(|| extractor.analyze(&bitmap));
            (extractor.extract(&bitmap), analysis, None)
        }
        Err(err) => {
            log::warn!("⚠️ 来源 {} 加载失败，使用默认背景色：{}", label, err);
            (ExtractionResult::fallback(), None, Some(ErrorReport::from(&err)))
        }
    };

    let background_file = match (&args.write_background, &result.background_image) {
        (Some(dir), Some(bitmap)) => {
            let path = dir.join(format!("backdrop-{:03}.png", index));
            match write_background(bitmap.as_rgba_image(), &path) {
                Ok(()) => Some(path.display().to_string()),
                Err(err) => {
                    log::warn!("⚠️ 来源 {} 的背景图未能保存：{}", label, err);
                    error = Some(ErrorReport::output(&err));
                    None
                }
            }
        }
        _ => None,
    };

    SourceReport {
        source: label,
        kind,
        dominant_color: DominantColorReport {
            css: result.dominant_color.css(),
            rgb: result.dominant_color,
        },
        flattened: result.is_flattened(),
        style: style_for(&result, mode),
        analysis,
        background_file,
        error,
    }
}

fn write_background(image: &image::RgbaImage, path: &Path) -> Result<(), AppError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| AppError::Output(format!("无法写入背景图 {}：{}", path.display(), e)))?;
    log::info!("💾 已写入背景图：{}", path.display());
    Ok(())
}

fn print_report(report: &SourceReport, pretty: bool) -> Result<(), AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .map_err(|e| AppError::Output(format!("报告序列化失败：{}", e)))?;

    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("menu-backdrop-cli-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn unwritable_background_is_reported_on_that_source_only() {
        let image_path = temp_path("dish.png");
        RgbaImage::from_pixel(12, 12, Rgba([30, 90, 200, 255]))
            .save_with_format(&image_path, ImageFormat::Png)
            .expect("write test image");
        // 输出目录实际是一个普通文件，写入必然失败
        let blocker = temp_path("not-a-dir");
        fs::write(&blocker, b"occupied").expect("write blocker file");

        let image_arg = image_path.to_string_lossy().into_owned();
        let blocker_arg = blocker.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "menu-backdrop",
            image_arg.as_str(),
            image_arg.as_str(),
            "--write-background",
            blocker_arg.as_str(),
        ]);
        let handler = BackdropHandler::new(BackdropConfig::default()).expect("handler init failed");
        let mode = args.display_mode();

        let mut reports = Vec::new();
        for (index, input) in args.sources.iter().enumerate() {
            reports.push(process_source(&handler, input, index, &mode, &args).await);
        }
        let _ = fs::remove_file(&image_path);
        let _ = fs::remove_file(&blocker);

        assert_eq!(reports.len(), 2);
        for report in &reports {
            let error = report.error.as_ref().expect("write failure should be reported");
            assert_eq!(error.stage, "output");
            assert_eq!(error.code, "E_OUTPUT");
            assert_eq!(report.background_file, None);
            assert!(report.style.background_image.is_some());
            assert_eq!(report.dominant_color.css, "rgb(30, 90, 200)");
        }
    }
}
