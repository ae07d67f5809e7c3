// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// 表格提取错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no table found")]
    NoTable,
}

/// 从表格中提取的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    /// 活动描述，有链接时为 `[标题](href)`
    pub activity: String,
    /// 原始日期字符串
    pub raw_date: String,
}

/// 从页面的第一个表格中提取活动行
///
/// 跳过表头行；少于两个单元格的行被忽略。第一个单元格提供标题和链接，
/// 第二个单元格提供日期。相对链接基于 `page_url` 解析。
///
/// # 参数
///
/// * `html` - 页面 HTML
/// * `page_url` - 页面地址
/// * `prefix` - 加在标题前的前缀
///
/// # 返回值
///
/// * `Ok(Vec<ExtractedRow>)` - 按表格顺序排列的行
/// * `Err(ExtractError::NoTable)` - 页面中没有表格
pub fn extract_activity_rows(
    html: &str,
    page_url: &str,
    prefix: &str,
) -> Result<Vec<ExtractedRow>, ExtractError> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE).next().ok_or(ExtractError::NoTable)?;
    let base = Url::parse(page_url).ok();

    let rows = table
        .select(&ROW)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
            if cells.len() < 2 {
                return None;
            }
            Some(extract_row(cells[0], cells[1], base.as_ref(), prefix))
        })
        .collect();

    Ok(rows)
}

fn extract_row(
    title_cell: ElementRef<'_>,
    date_cell: ElementRef<'_>,
    base: Option<&Url>,
    prefix: &str,
) -> ExtractedRow {
    let link = title_cell.select(&LINK).next();
    let title = match link {
        Some(anchor) => element_text(anchor),
        None => element_text(title_cell),
    };
    let full_title = format!("{} {}", prefix.trim(), title).trim().to_string();

    let href = link
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty());

    let activity = match href {
        Some(href) => format!("[{}]({})", full_title, resolve_href(base, href)),
        None => full_title,
    };

    ExtractedRow {
        activity,
        raw_date: element_text(date_cell),
    }
}

/// 元素的文本内容，空白被折叠为单个空格
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_href(base: Option<&Url>, href: &str) -> String {
    base.and_then(|base| base.join(href).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| href.to_string())
}
