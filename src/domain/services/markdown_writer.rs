// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::activity::ActivityRecord;
use crate::domain::models::category::Category;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TABLE_HEADER: &str = "| Activity | Date |\n|----------|------|\n";

/// 渲染 Markdown 表格
///
/// 行按传入顺序输出；单元格中的 `|` 会被转义
pub fn render_table(rows: &[ActivityRecord]) -> String {
    let mut out = String::from(TABLE_HEADER);
    for row in rows {
        out.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&row.activity),
            escape_cell(&row.display_date())
        ));
    }
    out
}

/// 写入分类文件
///
/// 先完整渲染并写入临时文件，再重命名到目标位置，不会留下写了一半的文件
///
/// # 返回值
///
/// * `Ok(PathBuf)` - 写入的文件路径
/// * `Err(io::Error)` - 目录创建或写入失败
pub fn write_category_file(
    dir: &Path,
    category: Category,
    rows: &[ActivityRecord],
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let target = dir.join(category.file_name());
    let staging = dir.join(format!(".{}.tmp", category.file_name()));

    fs::write(&staging, render_table(rows))?;
    if let Err(e) = fs::rename(&staging, &target) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    Ok(target)
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
