use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppResult, LoadError};
use crate::models::toc::{TocEntry, TocTable, TOC_COLUMNS};

/// 加载目录文件（逗号分隔）
pub async fn load_toc(toc_path: &Path) -> AppResult<TocTable> {
    load_toc_with_delimiter(toc_path, b',').await
}

/// 加载目录文件并按 (Folder, File Name) 排序
///
/// 所有列都按文本读取，不做 trim 或数值转换；表头多出的列会被忽略
pub async fn load_toc_with_delimiter(toc_path: &Path, delimiter: u8) -> AppResult<TocTable> {
    info!("📄 正在加载目录文件: {}", toc_path.display());

    let content = fs::read(toc_path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: toc_path.to_path_buf(),
            }
        } else {
            LoadError::ReadFailed {
                path: toc_path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let entries = parse_toc(toc_path, &content, delimiter)?;
    debug!("读取到 {} 行数据", entries.len());

    let table = TocTable::new(entries);
    info!("✓ 目录共 {} 个页面", table.len());
    Ok(table)
}

fn parse_toc(toc_path: &Path, content: &[u8], delimiter: u8) -> Result<Vec<TocEntry>, LoadError> {
    let malformed = |source: csv::Error| {
        let line = source.position().map(|p| p.line()).unwrap_or(1);
        LoadError::MalformedRow {
            path: toc_path.to_path_buf(),
            line,
            source,
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(content);

    let headers = reader.headers().map_err(malformed)?.clone();
    let missing: Vec<String> = TOC_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: toc_path.to_path_buf(),
            columns: missing,
        });
    }

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        let line = record.position().map(|p| p.line()).unwrap_or(1);
        let entry: TocEntry = record.deserialize(Some(&headers)).map_err(malformed)?;

        // Folder / File Name / URL 不能为空
        let required = [
            ("Folder", &entry.folder),
            ("File Name", &entry.file_name),
            ("URL", &entry.url),
        ];
        if let Some((column, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(LoadError::EmptyField {
                path: toc_path.to_path_buf(),
                line,
                column: *column,
            });
        }

        entries.push(entry);
    }
    Ok(entries)
}
