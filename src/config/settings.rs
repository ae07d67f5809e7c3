// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::utils::errors::SourceListError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含 HTTP 客户端、链接检查和活动抓取的所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// HTTP 客户端配置
    pub http: HttpSettings,
    /// 链接检查配置
    pub link_checker: LinkCheckerSettings,
    /// 活动抓取配置
    pub scraper: ScraperSettings,
}

/// HTTP 客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 最大重定向次数
    pub max_redirects: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            max_redirects: 10,
        }
    }
}

/// 链接检查配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LinkCheckerSettings {
    /// 要扫描的目录
    pub directory: String,
    /// 单个 HEAD 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl LinkCheckerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 活动抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 单个页面请求超时时间（秒）
    pub timeout_secs: u64,
    /// 并发抓取数
    pub workers: usize,
    /// Markdown 输出目录
    pub output_dir: String,
    /// 页面URL列表
    #[serde(default)]
    pub urls: Vec<String>,
    /// 与URL一一对应的标题前缀
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// 与URL一一对应的分类提示
    #[serde(default)]
    pub categories: Vec<String>,
}

/// 单个待抓取页面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// 页面URL
    pub url: String,
    /// 标题前缀
    pub prefix: String,
    /// 分类提示
    pub category_hint: String,
}

impl ScraperSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 将三个平行列表组合成页面列表
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<PageSource>)` - 按配置顺序排列的页面
    /// * `Err(SourceListError)` - 三个列表长度不一致
    pub fn sources(&self) -> Result<Vec<PageSource>, SourceListError> {
        if self.urls.len() != self.prefixes.len() || self.urls.len() != self.categories.len() {
            return Err(SourceListError::LengthMismatch {
                urls: self.urls.len(),
                prefixes: self.prefixes.len(),
                categories: self.categories.len(),
            });
        }

        Ok(self
            .urls
            .iter()
            .zip(&self.prefixes)
            .zip(&self.categories)
            .map(|((url, prefix), category)| PageSource {
                url: url.clone(),
                prefix: prefix.clone(),
                category_hint: category.clone(),
            })
            .collect())
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件和环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// 加载配置，可额外指定一个必须存在的配置文件
    ///
    /// 优先级从低到高：默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// 额外配置文件、`DEPTPAGES__` 前缀的环境变量
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = Config::builder()
            // Start with default settings
            .set_default("http.user_agent", "Mozilla/5.0")?
            .set_default("http.max_redirects", 10)?
            // Default link checker settings
            .set_default("link_checker.directory", ".")?
            .set_default("link_checker.timeout_secs", 5)?
            // Default scraper settings
            .set_default("scraper.timeout_secs", 15)?
            .set_default("scraper.workers", 10)?
            .set_default("scraper.output_dir", ".")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("DEPTPAGES")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scraper.urls")
                    .with_list_parse_key("scraper.prefixes")
                    .with_list_parse_key("scraper.categories")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
