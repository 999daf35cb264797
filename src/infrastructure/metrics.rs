// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 启动 Prometheus 指标导出
///
/// 未调用时 `metrics` 宏记录的指标会被丢弃
pub fn init_metrics(listen_addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = listen_addr.parse()?;

    // Port already in use is not fatal.
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(addr = %addr, error = %e, "Metrics exporter not installed");
        return Ok(());
    }

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
