// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：分类、活动记录、链接检查结果
/// - 服务（services）：日期解析、链接提取、表格提取和 Markdown 输出
///
/// 领域层不发起任何网络请求。
pub mod models;
pub mod services;
