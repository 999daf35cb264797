// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：从页面中提取全局计数器和国家行
/// - 报告构建（report_builder）：把字段组装成展示行
/// - 投递服务（delivery_service）：邮件与聊天渠道的分发及失败策略
pub mod delivery_service;
pub mod extraction_service;
pub mod report_builder;
