// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供轮询报告工作器和关闭信号处理
/// 每个周期依次执行抓取、提取、构建和投递，周期之间不重叠
pub mod report_worker;
pub mod shutdown;
pub mod worker;

pub use worker::Worker;
