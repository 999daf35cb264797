// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::TelegramSettings;
use crate::domain::models::DeliveryTarget;
use crate::domain::services::delivery_service::ChatSender;
use crate::utils::errors::DeliveryError;
use async_trait::async_trait;
use reqwest::{header, Client, Proxy};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Bot API 的通用响应
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram机器人消息发送器
pub struct TelegramChatSender {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramChatSender {
    /// 根据配置创建发送器
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(sender))` - 令牌和聊天ID都已配置
    /// * `Ok(None)` - 未配置聊天凭据，聊天渠道关闭
    /// * `Err(DeliveryError)` - 代理地址无效或客户端创建失败
    pub fn from_settings(settings: &TelegramSettings) -> Result<Option<Self>, DeliveryError> {
        let Some((token, chat_id)) = settings.credentials() else {
            return Ok(None);
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("statwatch/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs));

        if let Some(proxy_url) = settings.proxy() {
            // A bare host:port is a SOCKS5 endpoint.
            let proxy_url = if proxy_url.contains("://") {
                proxy_url.to_string()
            } else {
                format!("socks5://{}", proxy_url)
            };
            let proxy = Proxy::all(&proxy_url)
                .map_err(|e| DeliveryError::Transport(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        Ok(Some(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        }))
    }

    fn target(&self) -> DeliveryTarget {
        DeliveryTarget::ChatChannel {
            channel_id: self.chat_id.clone(),
        }
    }
}

#[async_trait]
impl ChatSender for TelegramChatSender {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!(
            "{}/bot{}/sendMessage?chat_id={}&text={}",
            self.api_base,
            self.token,
            urlencoding::encode(&self.chat_id),
            urlencoding::encode(text),
        );

        // Strip the URL from transport errors, it carries the bot token.
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DeliveryError::Send {
                target: self.target(),
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| DeliveryError::Send {
            target: self.target(),
            reason: e.without_url().to_string(),
        })?;
        debug!(status = %status, body = %body, "Response from telegram");

        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                target: self.target(),
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        match serde_json::from_str::<TelegramResponse>(&body) {
            Ok(parsed) if !parsed.ok => Err(DeliveryError::Rejected {
                target: self.target(),
                reason: parsed.description.unwrap_or_else(|| "ok=false".to_string()),
            }),
            _ => Ok(()),
        }
    }

    fn channel_id(&self) -> &str {
        &self.chat_id
    }
}
