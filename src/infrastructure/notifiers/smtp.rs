// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{SmtpSecurity, SmtpSettings};
use crate::domain::models::DeliveryTarget;
use crate::domain::services::delivery_service::{EmailMessage, EmailSender};
use crate::utils::errors::DeliveryError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::debug;

/// SMTP邮件发送器
///
/// 持有发件地址和登录凭据，每封邮件只发给一个收件人
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Address,
}

impl SmtpEmailSender {
    /// 创建SMTP发送器
    ///
    /// # 参数
    ///
    /// * `settings` - SMTP配置
    ///
    /// # 返回值
    ///
    /// * `Ok(SmtpEmailSender)` - 创建成功（此时尚未建立连接）
    /// * `Err(DeliveryError)` - 服务器或发件地址无效
    pub fn new(settings: &SmtpSettings) -> Result<Self, DeliveryError> {
        let from: Address = settings.email.parse().map_err(|e| {
            DeliveryError::Transport(format!("Invalid sender address {}: {}", settings.email, e))
        })?;

        let builder = match settings.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)
                    .map_err(|e| DeliveryError::Transport(e.to_string()))?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.server)
                .map_err(|e| DeliveryError::Transport(e.to_string()))?,
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.server.as_str())
            }
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.email.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(settings.timeout_secs)))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let target = DeliveryTarget::Email {
            address: message.to.clone(),
        };

        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
                target: target.clone(),
                reason: e.to_string(),
            })?;

        let email = Message::builder()
            .from(Mailbox::new(
                Some(message.from_label.clone()),
                self.from.clone(),
            ))
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| DeliveryError::Message {
                target: target.clone(),
                reason: e.to_string(),
            })?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| DeliveryError::Send {
                target,
                reason: e.to_string(),
            })?;

        debug!(to = %message.to, code = %response.code(), "SMTP message accepted");
        Ok(())
    }
}
