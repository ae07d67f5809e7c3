// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 活动分类
///
/// 固定的四个分类，未知的分类提示会被丢弃
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// 教育 (Eğitim)
    Education,
    /// 研发 (Arge)
    Research,
    /// 健康 (Sağlık)
    Health,
    /// 社会责任 (Sosyal Sorumluluk)
    SocialResponsibility,
}

impl Category {
    /// 所有分类，按输出顺序排列
    pub const ALL: [Category; 4] = [
        Category::Education,
        Category::Research,
        Category::Health,
        Category::SocialResponsibility,
    ];

    /// 将分类提示映射为分类
    ///
    /// 提示不区分大小写；不在允许列表中的提示返回 `None`
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_lowercase().as_str() {
            "egitim" | "ogrenci-faaliyetleri-ve-odulleri" => Some(Category::Education),
            "ar-ge" => Some(Category::Research),
            "saglik" | "sağlık" | "oduller" => Some(Category::Health),
            "sosyal-sorumluluk" | "sosyal_sorumluluk" => Some(Category::SocialResponsibility),
            _ => None,
        }
    }

    /// 分类的土耳其语名称
    pub fn label(&self) -> &'static str {
        match self {
            Category::Education => "Eğitim",
            Category::Research => "Arge",
            Category::Health => "Sağlık",
            Category::SocialResponsibility => "Sosyal Sorumluluk",
        }
    }

    /// 输出文件名（不含扩展名）
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Education => "education_activities",
            Category::Research => "research_activities",
            Category::Health => "health_activities",
            Category::SocialResponsibility => "social_responsibility_activities",
        }
    }

    /// 输出文件名
    pub fn file_name(&self) -> String {
        format!("{}.md", self.file_stem())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
