// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
pub mod date_parser;
pub mod link_extractor;
pub mod markdown_writer;
pub mod table_extractor;
