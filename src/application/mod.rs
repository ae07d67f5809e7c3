// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含应用程序的用例实现，用例只依赖领域服务和 `HttpEngine` 抽象
pub mod usecases;
