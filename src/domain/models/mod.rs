// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 解析文档（document）：一次轮询周期内持有的页面结构
/// - 字段（field）：规范化后的标签/数值对
/// - 报告（report）：按顺序排列的展示行
/// - 投递目标（delivery）：邮件收件人或聊天频道
pub mod delivery;
pub mod document;
pub mod field;
pub mod report;

pub use delivery::DeliveryTarget;
pub use document::RawDocument;
pub use field::Field;
pub use report::Report;
