// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、提取规则、报告格式和投递策略
pub mod domain;

/// 引擎模块
///
/// 实现统计页面的抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如SMTP、Telegram和指标导出
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现轮询报告工作器和关闭信号处理
pub mod workers;
