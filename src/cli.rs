use std::path::PathBuf;

use clap::Parser;

/// 为 HTML 页面生成打印效果的 PDF 快照。支持依赖 javascript 或 websocket 渲染的现代页面。
/// 目录文件列出需要截取的页面，可配合 PDF 拼接工具将页面汇编成报告。
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// 目录文件（列: Folder, File Name, URL, Orientation, Width, Height）
    pub toc: PathBuf,

    /// PDF 输出根目录
    pub dest_folder: PathBuf,
}
