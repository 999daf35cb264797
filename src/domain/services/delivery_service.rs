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

use crate::domain::models::{DeliveryTarget, Report};
use crate::utils::errors::DeliveryError;
use async_trait::async_trait;
use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};

/// 待发送的邮件
///
/// 发件地址和认证信息由 [`EmailSender`] 的实现持有
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 发件人显示名称
    pub from_label: String,
    /// 收件人地址
    pub to: String,
    /// 邮件主题
    pub subject: String,
    /// 纯文本正文
    pub body: String,
}

/// 邮件发送特质
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送一封邮件
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

/// 聊天消息发送特质
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// 向配置的频道发送一条消息
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError>;

    /// 频道标识
    fn channel_id(&self) -> &str;
}

/// 邮件信封配置
#[derive(Debug, Clone, Default)]
pub struct EmailEnvelope {
    pub recipients: Vec<String>,
    pub subject: String,
    pub from_label: String,
}

/// 投递分发器
///
/// 先按顺序向所有邮件收件人发送，任一收件人失败即返回错误（快速失败）；
/// 邮件全部成功后再发送聊天消息，聊天渠道的失败只记录日志，不向上传播。
pub struct DeliveryDispatcher {
    email: Option<Arc<dyn EmailSender>>,
    chat: Option<Arc<dyn ChatSender>>,
    envelope: EmailEnvelope,
}

impl DeliveryDispatcher {
    /// 创建投递分发器
    ///
    /// # 参数
    ///
    /// * `email` - 邮件发送器，没有收件人时可以为空
    /// * `chat` - 聊天发送器，为空表示未配置聊天凭据
    /// * `envelope` - 收件人、主题和发件人名称
    pub fn new(
        email: Option<Arc<dyn EmailSender>>,
        chat: Option<Arc<dyn ChatSender>>,
        envelope: EmailEnvelope,
    ) -> Self {
        Self {
            email,
            chat,
            envelope,
        }
    }

    /// 所有投递目标，邮件在前、聊天在后
    pub fn targets(&self) -> Vec<DeliveryTarget> {
        let mut targets: Vec<DeliveryTarget> = self
            .envelope
            .recipients
            .iter()
            .map(|address| DeliveryTarget::Email {
                address: address.clone(),
            })
            .collect();
        if let Some(chat) = &self.chat {
            targets.push(DeliveryTarget::ChatChannel {
                channel_id: chat.channel_id().to_string(),
            });
        }
        targets
    }

    /// 投递报告
    ///
    /// 邮件失败时立即返回错误，不再尝试聊天渠道；
    /// 聊天渠道的结果从不导致失败。
    pub async fn deliver(&self, report: &Report) -> Result<(), DeliveryError> {
        self.deliver_to_email(
            report,
            &self.envelope.recipients,
            &self.envelope.subject,
            &self.envelope.from_label,
        )
        .await?;
        self.deliver_to_chat(report).await
    }

    /// 向邮件收件人逐个发送报告
    ///
    /// 遇到第一个失败的收件人即停止，剩余收件人不会被尝试。
    pub async fn deliver_to_email(
        &self,
        report: &Report,
        recipients: &[String],
        subject: &str,
        from_label: &str,
    ) -> Result<(), DeliveryError> {
        if recipients.is_empty() {
            return Ok(());
        }

        let sender = self
            .email
            .as_ref()
            .ok_or_else(|| DeliveryError::Transport("no email transport configured".to_string()))?;

        let body = report.body();
        for recipient in recipients {
            let target = DeliveryTarget::Email {
                address: recipient.clone(),
            };
            counter!("report_delivery_attempts_total", "channel" => target.channel()).increment(1);

            let message = EmailMessage {
                from_label: from_label.to_string(),
                to: recipient.clone(),
                subject: subject.to_string(),
                body: body.clone(),
            };

            if let Err(e) = sender.send(&message).await {
                counter!("report_delivery_failed_total", "channel" => target.channel()).increment(1);
                return Err(e);
            }
            info!(to = %target, "Report emailed");
        }

        Ok(())
    }

    /// 向聊天频道发送报告
    ///
    /// 未配置聊天发送器时直接成功；发送失败只记录警告日志。
    pub async fn deliver_to_chat(&self, report: &Report) -> Result<(), DeliveryError> {
        let Some(chat) = &self.chat else {
            return Ok(());
        };

        let target = DeliveryTarget::ChatChannel {
            channel_id: chat.channel_id().to_string(),
        };
        counter!("report_delivery_attempts_total", "channel" => target.channel()).increment(1);
        match chat.send_message(&report.body()).await {
            Ok(()) => info!(channel = %target, "Report sent to chat"),
            Err(e) => {
                counter!("report_delivery_failed_total", "channel" => target.channel()).increment(1);
                warn!(channel = %target, "Error on send chat message: {}", e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "delivery_service_test.rs"]
mod tests;
