// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::PipelineError;
use async_trait::async_trait;

/// Worker trait定义
///
/// 由 main 启动的长时间运行任务，返回即表示轮询结束
#[async_trait]
pub trait Worker: Send + Sync {
    /// 运行工作器，直到收到关闭请求或发生终止性错误
    async fn run(&self) -> Result<(), PipelineError>;

    /// 获取工作器名称
    fn name(&self) -> &str;
}
