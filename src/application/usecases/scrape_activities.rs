// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::settings::PageSource;
use crate::domain::models::activity::ActivityRecord;
use crate::domain::models::category::Category;
use crate::domain::services::date_parser::parse_date;
use crate::domain::services::markdown_writer::write_category_file;
use crate::domain::services::table_extractor::{extract_activity_rows, ExtractedRow};
use crate::engines::traits::{FetchRequest, HttpEngine};
use crate::utils::errors::PageError;

// === Section: Result Types ===

/// 单个页面的提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRows {
    /// 页面所属分类
    pub category: Category,
    /// 表格中的行
    pub rows: Vec<ExtractedRow>,
}

/// 被跳过的页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub reason: String,
}

/// 按分类分组的活动记录
///
/// 四个分类始终存在，即使没有任何记录；只有非空分类会写出文件
#[derive(Debug, Clone)]
pub struct CategoryBuckets {
    buckets: BTreeMap<Category, Vec<ActivityRecord>>,
}

impl Default for CategoryBuckets {
    fn default() -> Self {
        Self {
            buckets: Category::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
        }
    }
}

impl CategoryBuckets {
    /// 合并一个页面的行，同时解析日期
    pub fn push_page(&mut self, source_index: usize, page: PageRows) {
        let bucket = self.buckets.entry(page.category).or_default();
        for (row_index, row) in page.rows.into_iter().enumerate() {
            bucket.push(ActivityRecord {
                category: page.category,
                date: parse_date(&row.raw_date),
                activity: row.activity,
                raw_date: row.raw_date,
                source_index,
                row_index,
            });
        }
    }

    /// 每个分类内按日期降序排列
    pub fn sort_newest_first(&mut self) {
        for rows in self.buckets.values_mut() {
            rows.sort_by(ActivityRecord::newest_first);
        }
    }

    pub fn rows(&self, category: Category) -> &[ActivityRecord] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ActivityRecord])> {
        self.buckets
            .iter()
            .map(|(category, rows)| (*category, rows.as_slice()))
    }

    pub fn total_rows(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// 一次抓取的汇总
#[derive(Debug)]
pub struct ScrapeSummary {
    /// 排序后的分类记录
    pub buckets: CategoryBuckets,
    /// 被跳过的页面
    pub failures: Vec<PageFailure>,
    /// 写入的文件（没有记录的分类不写文件）
    pub files: Vec<PathBuf>,
}

// === Section: Use Case Definition ===

/// 活动抓取用例
///
/// 以固定并发数抓取页面，提取第一个表格并按分类写出 Markdown 表格
pub struct ScrapeActivitiesUseCase {
    engine: Arc<dyn HttpEngine>,
    timeout: Duration,
    workers: usize,
}

// === Section: Implementation ===

impl ScrapeActivitiesUseCase {
    pub fn new(engine: Arc<dyn HttpEngine>, timeout: Duration, workers: usize) -> Self {
        Self {
            engine,
            timeout,
            workers: workers.max(1),
        }
    }

    /// 抓取并提取单个页面
    ///
    /// 分类提示在请求之前解析，未知分类不会发出请求
    ///
    /// # 返回值
    ///
    /// * `Ok(PageRows)` - 页面分类与表格行
    /// * `Err(PageError)` - 未知分类、请求失败、非 2xx 状态或没有表格
    pub async fn fetch_page(&self, source: &PageSource) -> Result<PageRows, PageError> {
        let category = Category::from_hint(&source.category_hint)
            .ok_or_else(|| PageError::UnknownCategory(source.category_hint.clone()))?;

        let request = FetchRequest::get(source.url.as_str(), self.timeout);
        let response = self.engine.fetch(&request).await?;
        if !response.is_success() {
            return Err(PageError::HttpStatus(response.status_code));
        }

        let rows = extract_activity_rows(&response.content, &response.final_url, &source.prefix)?;
        Ok(PageRows { category, rows })
    }

    /// 并发抓取所有页面并按分类合并
    ///
    /// 结果按完成顺序在当前任务中合并；单个页面失败时立即向 `out` 输出一行，
    /// 然后跳过该页面
    ///
    /// # 返回值
    ///
    /// * `Ok((CategoryBuckets, Vec<PageFailure>))` - 合并后的记录与失败页面
    /// * `Err(anyhow::Error)` - 输出失败
    pub async fn collect<W: Write>(
        &self,
        sources: &[PageSource],
        out: &mut W,
    ) -> Result<(CategoryBuckets, Vec<PageFailure>)> {
        let mut buckets = CategoryBuckets::default();
        let mut failures = Vec::new();

        let mut pages = stream::iter(sources.iter().enumerate())
            .map(|(index, source)| async move { (index, source, self.fetch_page(source).await) })
            .buffer_unordered(self.workers);

        while let Some((index, source, result)) = pages.next().await {
            match result {
                Ok(page) => {
                    debug!(
                        url = %source.url,
                        category = %page.category,
                        rows = page.rows.len(),
                        "page extracted"
                    );
                    buckets.push_page(index, page);
                }
                Err(e) => {
                    warn!(url = %source.url, error = %e, "page skipped");
                    writeln!(out, "Failed to fetch URL {}: {}", source.url, e)?;
                    failures.push(PageFailure {
                        url: source.url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((buckets, failures))
    }

    /// 执行完整的抓取流程
    ///
    /// # 参数
    ///
    /// * `sources` - 已校验的页面列表
    /// * `output_dir` - Markdown 输出目录
    /// * `out` - 面向用户的输出
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeSummary)` - 抓取汇总
    /// * `Err(anyhow::Error)` - 文件写入或输出失败
    pub async fn run<W: Write>(
        &self,
        sources: &[PageSource],
        output_dir: &Path,
        out: &mut W,
    ) -> Result<ScrapeSummary> {
        info!(pages = sources.len(), workers = self.workers, "scraping activity pages");

        let (mut buckets, failures) = self.collect(sources, out).await?;
        buckets.sort_newest_first();

        // Categories without rows keep whatever file a previous run left behind.
        let mut files = Vec::new();
        for (category, rows) in buckets.iter() {
            if rows.is_empty() {
                info!(category = %category, "no rows, file left untouched");
                continue;
            }
            let path = write_category_file(output_dir, category, rows)
                .with_context(|| format!("failed to write {}", category.file_name()))?;
            writeln!(out, "Markdown file saved: {}", path.display())?;
            files.push(path);
        }

        info!(
            rows = buckets.total_rows(),
            failed_pages = failures.len(),
            "scrape finished"
        );

        Ok(ScrapeSummary {
            buckets,
            failures,
            files,
        })
    }
}
