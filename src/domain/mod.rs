// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：字段、报告、投递目标和解析后的文档
/// - 服务（services）：字段提取、报告构建和多渠道投递
///
/// 领域层只通过 trait 与抓取和发送等外部协作者交互。
pub mod models;
pub mod services;
