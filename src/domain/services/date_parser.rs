// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::activity::CanonicalDate;
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// 土耳其语月份名称表（首字母大写与全小写两种写法）
static TURKISH_MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let names = [
        ("Ocak", "ocak"),
        ("Şubat", "şubat"),
        ("Mart", "mart"),
        ("Nisan", "nisan"),
        ("Mayıs", "mayıs"),
        ("Haziran", "haziran"),
        ("Temmuz", "temmuz"),
        ("Ağustos", "ağustos"),
        ("Eylül", "eylül"),
        ("Ekim", "ekim"),
        ("Kasım", "kasım"),
        ("Aralık", "aralık"),
    ];

    let mut months = HashMap::new();
    for (index, (title, lower)) in names.into_iter().enumerate() {
        months.insert(title, index as u32 + 1);
        months.insert(lower, index as u32 + 1);
    }
    months
});

// 15 Mart 2021
static DAY_MONTH_NAME_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})\s+(\w+)\s+([0-9]{4})$").unwrap());

// 2021
static BARE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

// 2019-2020-2021
static YEAR_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}(-[0-9]{4})+$").unwrap());

/// 将原始日期字符串解析为规范化日期
///
/// 这是一个全函数：任何输入都返回有效日期或 `CanonicalDate::Missing`，不会 panic。
/// 规则按顺序匹配，第一个适用的规则决定结果：
///
/// 1. 空白字符串 → 缺失
/// 2. 含有 `.` → 日在前的数字日期
/// 3. `<日> <土耳其语月份> <年>` → 对应日期
/// 4. 恰好两个 `-`：首段为四位年份时按 ISO 解析，否则解析中间一段
/// 5. 四位年份 → 该年 1 月 1 日
/// 6. `-` 连接的年份列表 → 最后一年的 1 月 1 日
/// 7. 其他 → 缺失
///
/// 公元 1 年之前的日期视为缺失。
pub fn parse_date(raw: &str) -> CanonicalDate {
    let value = raw.trim();
    if value.is_empty() {
        return CanonicalDate::Missing;
    }

    let reference_year = Local::now().year();
    match try_parse(value, reference_year).filter(|date| date.year() >= 1) {
        Some(date) => CanonicalDate::Date(date),
        None => CanonicalDate::Missing,
    }
}

fn try_parse(value: &str, reference_year: i32) -> Option<NaiveDate> {
    if value.contains('.') {
        return parse_day_first(value, reference_year);
    }

    // An unknown month name falls through to the remaining rules.
    if let Some((day, month, year)) = day_month_name_year(value) {
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if value.matches('-').count() == 2 {
        let segments: Vec<&str> = value.split('-').collect();
        if segments[0].len() == 4 && segments[0].bytes().all(|b| b.is_ascii_digit()) {
            return parse_iso(value);
        }
        return parse_day_first(segments[1], reference_year);
    }

    if BARE_YEAR.is_match(value) {
        return NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1);
    }

    if YEAR_LIST.is_match(value) {
        let last = value.rsplit('-').next()?;
        return NaiveDate::from_ymd_opt(last.parse().ok()?, 1, 1);
    }

    None
}

/// 匹配 `<日> <月份名> <年>`，月份名不在表中时返回 `None`
fn day_month_name_year(value: &str) -> Option<(u32, u32, i32)> {
    let captures = DAY_MONTH_NAME_YEAR.captures(value)?;
    let month = *TURKISH_MONTHS.get(captures.get(2)?.as_str())?;
    let day = captures.get(1)?.as_str().parse().ok()?;
    let year = captures.get(3)?.as_str().parse().ok()?;
    Some((day, month, year))
}

/// ISO 日期，忽略时间部分：`2021-03-15`、`2021-3-5`、`2021-03-15T10:00`
fn parse_iso(value: &str) -> Option<NaiveDate> {
    let date_part = value.split(|c: char| c == 'T' || c.is_whitespace()).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// 日在前的数字日期
///
/// 支持 `.` 与 `/` 分隔符、两位年份以及年份在前的 `yyyy.mm.dd`；
/// 第一个空白之后的内容（时间）被忽略。日在前无法构成日期而交换日月可以时
/// （如 `03.15.2021`），按月在前解析。
fn parse_day_first(value: &str, reference_year: i32) -> Option<NaiveDate> {
    let token = value.split_whitespace().next()?;
    let segments: Vec<&str> = token
        .split(['.', '/'])
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 3
        || !segments
            .iter()
            .all(|segment| segment.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    if segments[0].len() == 4 {
        let year = segments[0].parse().ok()?;
        let month = segments[1].parse().ok()?;
        let day = segments[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let day = segments[0].parse().ok()?;
    let month = segments[1].parse().ok()?;
    let year = match segments[2].len() {
        4 => segments[2].parse().ok()?,
        2 => expand_two_digit_year(segments[2].parse().ok()?, reference_year),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month > 12 && day <= 12 {
            NaiveDate::from_ymd_opt(year, day, month)
        } else {
            None
        }
    })
}

/// 两位年份展开到参考年份前后 50 年的窗口内
///
/// 先补上参考年份的世纪；结果不早于 `reference_year - 50`，且早于 `reference_year + 50`
fn expand_two_digit_year(year: i32, reference_year: i32) -> i32 {
    let expanded = reference_year / 100 * 100 + year;
    if expanded >= reference_year + 50 {
        expanded - 100
    } else if expanded < reference_year - 50 {
        expanded + 100
    } else {
        expanded
    }
}

#[cfg(test)]
#[path = "date_parser_test.rs"]
mod tests;
