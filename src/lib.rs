// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含链接检查与活动抓取两个用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体以及日期解析、链接提取、表格提取等领域服务
pub mod domain;

/// 引擎模块
///
/// 提供 HTTP 抓取引擎的抽象与实现
pub mod engines;

/// 工具模块
///
/// 提供错误类型和日志初始化
pub mod utils;
