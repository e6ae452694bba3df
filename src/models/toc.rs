//! 目录（table of contents）数据模型

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, CaptureError};

/// 目录文件必需的列名
pub const TOC_COLUMNS: [&str; 6] = ["Folder", "File Name", "URL", "Orientation", "Width", "Height"];

/// 目录中的一行
///
/// 所有字段都按原样保存为字符串，宽高在导出时才拼上 `in` 单位
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TocEntry {
    #[serde(rename = "Folder")]
    pub folder: String,
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "URL")]
    pub url: String,
    /// 仅为兼容配套工具的文件格式而保留，截取时不使用
    #[serde(rename = "Orientation")]
    pub orientation: String,
    #[serde(rename = "Width")]
    pub width: String,
    #[serde(rename = "Height")]
    pub height: String,
}

impl TocEntry {
    /// 输出文件路径: `dest_folder/folder/file_name`
    pub fn target_path(&self, dest_folder: &Path) -> PathBuf {
        dest_folder.join(&self.folder).join(&self.file_name)
    }

    /// 带单位的宽度，例如 `8.5in`
    pub fn width_with_unit(&self) -> String {
        format!("{}in", self.width)
    }

    /// 带单位的高度，例如 `11in`
    pub fn height_with_unit(&self) -> String {
        format!("{}in", self.height)
    }

    /// 解析页面尺寸
    pub fn paper_size(&self) -> AppResult<PaperSize> {
        Ok(PaperSize {
            width: self.width_with_unit().parse()?,
            height: self.height_with_unit().parse()?,
        })
    }
}

/// 排序后的目录
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocTable {
    entries: Vec<TocEntry>,
}

impl TocTable {
    /// 按 (folder, file_name) 升序稳定排序后构造
    pub fn new(mut entries: Vec<TocEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.folder
                .cmp(&b.folder)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&TocEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TocEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TocTable {
    type Item = &'a TocEntry;
    type IntoIter = std::slice::Iter<'a, TocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// 以英寸为单位的长度（CDP 的 paperWidth / paperHeight 以英寸为单位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(f64);

impl Length {
    pub fn inches(value: f64) -> Self {
        Self(value)
    }

    pub fn as_inches(self) -> f64 {
        self.0
    }
}

impl std::str::FromStr for Length {
    type Err = CaptureError;

    /// 解析 `<数字>in`，数字前后的空白不做 trim，`" 8.5in"` 会被拒绝
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CaptureError::InvalidDimension {
            value: s.to_string(),
        };

        let number = s.strip_suffix("in").ok_or_else(invalid)?;

        // 只接受普通十进制数字，拒绝 inf / NaN / 空值
        if number.is_empty()
            || !number
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            return Err(invalid());
        }
        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid());
        }

        Ok(Self(value))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}in", self.0)
    }
}

/// 导出 PDF 的页面尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width: Length,
    pub height: Length,
}

impl PaperSize {
    pub fn width_inches(&self) -> f64 {
        self.width.as_inches()
    }

    pub fn height_inches(&self) -> f64 {
        self.height.as_inches()
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}
