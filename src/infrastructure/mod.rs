// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 指标（metrics）：Prometheus 指标导出
/// - 通知渠道（notifiers）：SMTP 邮件和 Telegram 机器人的具体实现
pub mod metrics;
pub mod notifiers;
