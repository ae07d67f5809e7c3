// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 链接检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// 请求成功返回的状态码
    Status(u16),
    /// 请求本身失败（超时、连接错误等）
    Error(String),
}

impl LinkStatus {
    /// 状态码 >= 400 或请求失败即视为失效
    pub fn is_broken(&self) -> bool {
        match self {
            LinkStatus::Status(code) => *code >= 400,
            LinkStatus::Error(_) => true,
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Status(code) => write!(f, "{}", code),
            LinkStatus::Error(message) => f.write_str(message),
        }
    }
}

/// 链接记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// 来源文件名
    pub file_name: String,
    /// 链接文本
    pub text: String,
    /// 目标URL
    pub url: String,
    /// 检查结果
    pub status: LinkStatus,
}

impl LinkRecord {
    pub fn is_broken(&self) -> bool {
        self.status.is_broken()
    }
}

/// 一次运行的链接检查报告
#[derive(Debug, Default)]
pub struct LinkReport {
    /// 已扫描的文件数
    pub files_scanned: usize,
    /// 所有检查过的链接
    pub records: Vec<LinkRecord>,
}

impl LinkReport {
    /// 失效链接
    pub fn broken(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter().filter(|r| r.is_broken())
    }

    pub fn broken_count(&self) -> usize {
        self.broken().count()
    }

    /// 渲染汇总报告
    pub fn render_summary(&self) -> String {
        let broken: Vec<&LinkRecord> = self.broken().collect();
        if broken.is_empty() {
            return "\nNo broken links found!\n".to_string();
        }

        let mut out = String::from("\n--- Broken Links Report ---\n");
        for record in broken {
            out.push_str(&format!(
                "In '{}': [{}]({}) → {}\n",
                record.file_name, record.text, record.url, record.status
            ));
        }
        out
    }
}
