// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

// [text](http...)
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((http.*?)\)").unwrap());

/// Markdown 文档中的一个外部链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownLink {
    /// 链接文本
    pub text: String,
    /// 目标URL
    pub url: String,
}

/// 提取 Markdown 内容中所有 `[text](http...)` 形式的链接
///
/// 按出现顺序返回，重复的链接不会去重
pub fn extract_links(content: &str) -> Vec<MarkdownLink> {
    MARKDOWN_LINK
        .captures_iter(content)
        .filter_map(|captures| {
            Some(MarkdownLink {
                text: captures.get(1)?.as_str().to_string(),
                url: captures.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}
