// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::models::link::{LinkRecord, LinkReport, LinkStatus};
use crate::domain::services::link_extractor::extract_links;
use crate::engines::traits::{FetchRequest, HttpEngine};

// === Section: Use Case Definition ===

/// 链接检查用例
///
/// 顺序扫描目录下的 `*.md` 文件，对每个外部链接发送 HEAD 请求
pub struct LinkCheckUseCase {
    engine: Arc<dyn HttpEngine>,
    timeout: Duration,
}

// === Section: Implementation ===

impl LinkCheckUseCase {
    pub fn new(engine: Arc<dyn HttpEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// 检查目录中的所有 Markdown 文件
    ///
    /// 逐个链接输出检查结果，最后输出汇总报告
    ///
    /// # 参数
    ///
    /// * `dir` - 要扫描的目录（不递归）
    /// * `out` - 报告输出位置
    ///
    /// # 返回值
    ///
    /// * `Ok(LinkReport)` - 所有链接的检查结果
    /// * `Err(anyhow::Error)` - 目录无法读取或输出失败
    pub async fn check_directory<W: Write>(&self, dir: &Path, out: &mut W) -> Result<LinkReport> {
        let files = markdown_files(dir)
            .await
            .with_context(|| format!("failed to read directory {}", dir.display()))?;
        info!(directory = %dir.display(), files = files.len(), "checking markdown links");

        let mut report = LinkReport::default();
        for path in files {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(file = %file_name, error = %e, "skipping unreadable file");
                    writeln!(out, "\n❌ Could not read {}: {}", file_name, e)?;
                    continue;
                }
            };
            report.files_scanned += 1;

            writeln!(out, "\nChecking links in: {}", file_name)?;
            for link in extract_links(&content) {
                let status = self.check_link(&link.url).await;
                match &status {
                    LinkStatus::Status(code) if status.is_broken() => {
                        writeln!(out, "❌ Broken: {} ({})", link.url, code)?
                    }
                    LinkStatus::Status(_) => writeln!(out, "✅ OK: {}", link.url)?,
                    LinkStatus::Error(message) => {
                        writeln!(out, "❌ Error: {} ({})", link.url, message)?
                    }
                }

                report.records.push(LinkRecord {
                    file_name: file_name.clone(),
                    text: link.text,
                    url: link.url,
                    status,
                });
            }
        }

        write!(out, "{}", report.render_summary())?;
        info!(
            links = report.records.len(),
            broken = report.broken_count(),
            "link check finished"
        );
        Ok(report)
    }

    /// 检查单个链接
    pub async fn check_link(&self, url: &str) -> LinkStatus {
        let request = FetchRequest::head(url, self.timeout);
        match self.engine.fetch(&request).await {
            Ok(response) => {
                debug!(url, status = response.status_code, "link checked");
                LinkStatus::Status(response.status_code)
            }
            Err(e) => {
                debug!(url, error = %e, "link request failed");
                LinkStatus::Error(e.to_string())
            }
        }
    }
}

/// 目录下的 `*.md` 文件，按文件名排序
async fn markdown_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if is_markdown && is_file {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
