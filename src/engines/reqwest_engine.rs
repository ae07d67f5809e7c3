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

use crate::config::settings::HttpSettings;
use crate::engines::traits::{EngineError, FetchMethod, FetchRequest, FetchResponse, HttpEngine};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP引擎，所有请求共享同一个客户端
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的引擎实例
    ///
    /// # 参数
    ///
    /// * `settings` - HTTP 客户端配置（User-Agent、重定向次数）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new(settings: &HttpSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(Policy::limited(settings.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpEngine for ReqwestEngine {
    /// 执行HTTP请求
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 任意状态码的响应，只有 2xx 的 GET 响应读取内容
    /// * `Err(EngineError)` - 传输层错误
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let builder = match request.method {
            FetchMethod::Get => self.client.get(&request.url),
            FetchMethod::Head => self.client.head(&request.url),
        };

        let start = Instant::now();
        let response = builder
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout(request.timeout)
                } else {
                    EngineError::RequestFailed(e)
                }
            })?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        // Only successful GET responses carry a body.
        let content = match request.method {
            FetchMethod::Get if response.status().is_success() => response.text().await?,
            _ => String::new(),
        };

        debug!(
            url = %request.url,
            status = status_code,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        Ok(FetchResponse {
            status_code,
            final_url,
            content,
        })
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
