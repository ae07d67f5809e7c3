// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// 规范化日期
///
/// `Missing` 排在任何有效日期之前，因此按降序排列时缺失日期位于末尾
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalDate {
    /// 无法解析的日期
    Missing,
    /// 有效日期
    Date(NaiveDate),
}

impl CanonicalDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CanonicalDate::Date)
            .unwrap_or(CanonicalDate::Missing)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CanonicalDate::Missing)
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CanonicalDate::Date(date) => Some(*date),
            CanonicalDate::Missing => None,
        }
    }

    /// 渲染为 `dd.mm.yyyy`，缺失时原样返回原始字符串
    pub fn render(&self, raw: &str) -> String {
        match self {
            CanonicalDate::Date(date) => date.format("%d.%m.%Y").to_string(),
            CanonicalDate::Missing => raw.to_string(),
        }
    }
}

/// 活动记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    /// 所属分类
    pub category: Category,
    /// 活动描述（可能包含 Markdown 链接）
    pub activity: String,
    /// 页面上的原始日期字符串
    pub raw_date: String,
    /// 解析后的日期
    pub date: CanonicalDate,
    /// 来源页面在输入列表中的位置
    pub source_index: usize,
    /// 在来源页面表格中的行号
    pub row_index: usize,
}

impl ActivityRecord {
    /// 表格中显示的日期
    pub fn display_date(&self) -> String {
        self.date.render(&self.raw_date)
    }

    /// 最新优先的排序规则
    ///
    /// 日期降序；日期相同（或都缺失）时按来源页面、行号升序
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.date
            .cmp(&a.date)
            .then_with(|| a.source_index.cmp(&b.source_index))
            .then_with(|| a.row_index.cmp(&b.row_index))
    }
}
