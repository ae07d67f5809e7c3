// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::table_extractor::ExtractError;
use crate::engines::traits::EngineError;
use thiserror::Error;

/// 页面级错误类型
///
/// 单个页面失败只会导致该页面被跳过，不会中断整批抓取
#[derive(Error, Debug)]
pub enum PageError {
    #[error("unknown category hint '{0}'")]
    UnknownCategory(String),

    #[error("{0}")]
    Fetch(#[from] EngineError),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Extract(#[from] ExtractError),
}

/// 数据源列表错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SourceListError {
    #[error(
        "URLs, prefixes and categories must have the same length (urls: {urls}, prefixes: {prefixes}, categories: {categories})"
    )]
    LengthMismatch {
        urls: usize,
        prefixes: usize,
        categories: usize,
    },
}
