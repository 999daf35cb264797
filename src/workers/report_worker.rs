// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::{RawDocument, Report};
use crate::domain::services::delivery_service::DeliveryDispatcher;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::report_builder::build_report;
use crate::engines::traits::MarkupFetcher;
use crate::utils::errors::{ParseError, PipelineError};
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::Utc;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

/// 报告工作器
///
/// 每个周期依次执行：抓取 → 解析 → 提取 → 构建 → 投递，然后等待下一个周期。
/// 抓取、解析和邮件错误会结束循环；关闭请求只在周期之间生效。
pub struct ReportWorker {
    fetcher: Arc<dyn MarkupFetcher>,
    extractor: ExtractionService,
    dispatcher: DeliveryDispatcher,
    source_url: String,
    country: String,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl ReportWorker {
    /// 创建报告工作器
    ///
    /// # 参数
    ///
    /// * `fetcher` - 页面抓取引擎
    /// * `extractor` - 提取服务
    /// * `dispatcher` - 投递分发器
    /// * `source_url` - 统计页面URL
    /// * `country` - 目标国家，为空表示关闭国家分节
    /// * `interval` - 两个周期之间的等待时间
    /// * `shutdown` - 关闭请求通道
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fetcher: Arc<dyn MarkupFetcher>,
        extractor: ExtractionService,
        dispatcher: DeliveryDispatcher,
        source_url: String,
        country: String,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            dispatcher,
            source_url,
            country,
            interval,
            shutdown,
        }
    }

    /// 从页面内容构建报告
    ///
    /// 同步执行，解析后的文档在返回前被丢弃
    pub fn build_report(&self, markup: &str) -> Result<Report, ParseError> {
        let doc = RawDocument::parse(markup)?;

        let global = self.extractor.extract_global_fields(&doc);
        let country = self.extractor.extract_country_row(&doc, &self.country);

        let extracted = global.len() + country.as_ref().map_or(0, Vec::len);
        counter!("report_fields_extracted_total").increment(extracted as u64);

        Ok(build_report(&global, country.as_deref(), &self.country))
    }

    /// 执行一个完整周期
    ///
    /// 报告为空时跳过投递
    pub async fn run_cycle(&self) -> Result<Report, PipelineError> {
        let start = Instant::now();
        counter!("report_cycles_total").increment(1);

        let markup = self.fetcher.fetch(&self.source_url).await?;
        let report = self.build_report(&markup)?;
        info!(lines = ?report.lines(), "New data received");

        if report.is_empty() {
            warn!(url = %self.source_url, "Report is empty, skipping delivery");
        } else {
            self.dispatcher.deliver(&report).await?;
            info!("New data sent");
        }

        histogram!("report_cycle_duration_seconds").record(start.elapsed().as_secs_f64());
        Ok(report)
    }

    /// 等待下一个周期
    ///
    /// # 返回值
    ///
    /// 等待期间收到关闭请求时返回 `true`
    async fn wait_for_next_cycle(&self, shutdown: &mut watch::Receiver<bool>) -> bool {
        let next_run = Utc::now()
            + chrono::Duration::from_std(self.interval).unwrap_or_else(|_| chrono::Duration::zero());
        info!(next_run = %next_run.to_rfc3339(), "Waiting for next cycle");

        let stop = tokio::select! {
            _ = sleep(self.interval) => Some(false),
            res = shutdown.wait_for(|stop| *stop) => res.ok().map(|_| true),
        };

        match stop {
            Some(stop) => stop,
            None => {
                // Sender dropped: no shutdown can arrive any more.
                sleep(self.interval).await;
                false
            }
        }
    }
}

#[async_trait]
impl Worker for ReportWorker {
    async fn run(&self) -> Result<(), PipelineError> {
        info!(url = %self.source_url, interval_secs = self.interval.as_secs(), "Report worker started");
        let mut shutdown = self.shutdown.clone();

        loop {
            if *shutdown.borrow() {
                break;
            }

            self.run_cycle().await?;

            if self.wait_for_next_cycle(&mut shutdown).await {
                break;
            }
        }

        info!("Report worker stopped");
        Ok(())
    }

    fn name(&self) -> &str {
        "report_worker"
    }
}

#[cfg(test)]
#[path = "report_worker_test.rs"]
mod tests;
