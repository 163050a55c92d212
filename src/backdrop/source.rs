//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `ImageSource` 表示外部来源语义
//! - `RawImageData` 表示已加载、已确认格式但未解码的字节

/// 图片输入来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// 网络地址来源。
    Url(String),
    /// Base64（支持 Data URL 与纯 Base64 字符串）。
    Base64(String),
    /// 本地文件路径来源。
    FilePath(String),
}

impl ImageSource {
    /// 按输入文本猜测来源类型。
    ///
    /// # 示例
    /// ```rust
    /// use menu_backdrop::backdrop::ImageSource;
    ///
    /// assert!(matches!(ImageSource::detect("https://a.b/c.png"), ImageSource::Url(_)));
    /// assert!(matches!(ImageSource::detect("data:image/png;base64,AAAA"), ImageSource::Base64(_)));
    /// assert!(matches!(ImageSource::detect("./menu.jpg"), ImageSource::FilePath(_)));
    /// ```
    pub fn detect(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else if lower.starts_with("data:image/") {
            Self::Base64(trimmed.to_string())
        } else {
            Self::FilePath(trimmed.to_string())
        }
    }

    /// 来源类别（用于日志与诊断）。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Base64(_) => "base64",
            Self::FilePath(_) => "file",
        }
    }

    /// 适合写入报告的简短描述，Base64 内容会被截断。
    pub fn label(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::FilePath(path) => path.clone(),
            Self::Base64(data) => {
                let head: String = data.chars().take(32).collect();
                if data.len() > head.len() {
                    format!("{}…({} chars)", head, data.len())
                } else {
                    head
                }
            }
        }
    }
}

/// 加载阶段输出：原始字节、嗅探出的格式与来源类别。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 由魔数确定，解码时不再猜测。
    pub(crate) format: image::ImageFormat,
    /// 来源类别（用于日志与诊断）。
    pub(crate) origin: &'static str,
}
