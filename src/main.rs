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

use statwatch::config::settings::Settings;
use statwatch::domain::services::delivery_service::{
    ChatSender, DeliveryDispatcher, EmailEnvelope, EmailSender,
};
use statwatch::domain::services::extraction_service::ExtractionService;
use statwatch::engines::reqwest_engine::ReqwestFetcher;
use statwatch::infrastructure::notifiers::{SmtpEmailSender, TelegramChatSender};
use statwatch::utils::telemetry;
use statwatch::workers::report_worker::ReportWorker;
use statwatch::workers::shutdown::spawn_signal_listener;
use statwatch::workers::Worker;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

const PROJECT_NAME: &str = "COVID-19-Reporter";

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动轮询
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("{} is starting...", PROJECT_NAME);

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.metrics.enabled {
        statwatch::infrastructure::metrics::init_metrics(&settings.metrics.listen_addr)?;
    }

    // 3. Initialize delivery channels
    let email: Option<Arc<dyn EmailSender>> = if settings.report.recipients.is_empty() {
        None
    } else {
        Some(Arc::new(SmtpEmailSender::new(&settings.smtp)?) as Arc<dyn EmailSender>)
    };
    let chat = TelegramChatSender::from_settings(&settings.telegram)?
        .map(|sender| Arc::new(sender) as Arc<dyn ChatSender>);
    let dispatcher = DeliveryDispatcher::new(
        email,
        chat,
        EmailEnvelope {
            recipients: settings.report.recipients.clone(),
            subject: settings.report.subject.clone(),
            from_label: settings.report.from_label.clone(),
        },
    );
    info!(targets = ?dispatcher.targets(), "Delivery targets configured");

    // 4. Start polling and signal listener
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = ReportWorker::new(
        Arc::new(ReqwestFetcher::new(&settings.source)?),
        ExtractionService::new()?,
        dispatcher,
        settings.source.url.clone(),
        settings.report.country.clone(),
        settings.report.period(),
        shutdown_rx,
    );

    let signal_listener = spawn_signal_listener(shutdown_tx);
    let result = tokio::spawn(async move { worker.run().await }).await?;
    signal_listener.abort();

    match &result {
        Ok(()) => info!("Exit without errors"),
        Err(e) => error!("Exit with error: {}", e),
    }
    info!("{} is stopping...", PROJECT_NAME);

    result.map_err(Into::into)
}
