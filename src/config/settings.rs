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

use crate::utils::errors::SettingsError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use validator::{Validate, ValidateEmail, ValidationError};

/// 应用程序配置设置
///
/// 进程启动时加载一次，运行期间只读
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_email_transport"))]
pub struct Settings {
    /// 数据源配置
    #[validate(nested)]
    pub source: SourceSettings,
    /// 报告配置
    #[validate(nested)]
    pub report: ReportSettings,
    /// SMTP配置
    pub smtp: SmtpSettings,
    /// Telegram配置
    #[validate(nested)]
    pub telegram: TelegramSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 数据源配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SourceSettings {
    /// 统计页面URL
    #[validate(url)]
    pub url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 请求使用的User-Agent
    pub user_agent: String,
}

/// 报告配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportSettings {
    /// 轮询间隔（分钟）
    #[validate(range(min = 1, max = 10080))]
    pub period_minutes: u64,
    /// 邮件收件人
    #[serde(default, deserialize_with = "list_or_joined")]
    #[validate(custom(function = "validate_recipients"))]
    pub recipients: Vec<String>,
    /// 目标国家，为空表示不输出国家分节
    #[serde(default)]
    pub country: String,
    /// 邮件主题
    pub subject: String,
    /// 发件人显示名称
    pub from_label: String,
}

impl ReportSettings {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_minutes.saturating_mul(60))
    }
}

/// SMTP连接安全模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// 明文连接后升级为TLS
    StartTls,
    /// 直接TLS连接
    Tls,
    /// 不加密，仅用于本地测试服务器
    None,
}

/// SMTP配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
    /// SMTP服务器主机名
    #[serde(default)]
    pub server: String,
    /// SMTP端口
    pub port: u16,
    /// 发件地址，同时作为登录用户名
    #[serde(default)]
    pub email: String,
    /// 登录密码
    #[serde(default)]
    pub password: String,
    /// 连接安全模式
    pub security: SmtpSecurity,
    /// 超时时间（秒）
    pub timeout_secs: u64,
}

/// Telegram配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TelegramSettings {
    /// 机器人令牌
    pub token: Option<String>,
    /// 目标聊天ID
    pub chat_id: Option<String>,
    /// 代理地址，未写协议时按 SOCKS5 处理
    pub proxy_url: Option<String>,
    /// Bot API 地址
    #[validate(url)]
    pub api_base: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl TelegramSettings {
    /// 令牌和聊天ID都存在且非空时返回二者
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let token = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let chat_id = self.chat_id.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
        Some((token, chat_id))
    }

    /// 代理地址，空字符串视为未配置
    pub fn proxy(&self) -> Option<&str> {
        self.proxy_url.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

/// 接受列表或逗号分隔的字符串（环境变量形式）
fn list_or_joined<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrJoined {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match ListOrJoined::deserialize(deserializer)? {
        ListOrJoined::List(items) => items,
        ListOrJoined::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    })
}

#[allow(clippy::ptr_arg)]
fn validate_recipients(recipients: &Vec<String>) -> Result<(), ValidationError> {
    if recipients.iter().all(|r| r.validate_email()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_recipient"))
    }
}

fn validate_email_transport(settings: &Settings) -> Result<(), ValidationError> {
    if settings.report.recipients.is_empty() {
        return Ok(());
    }
    if settings.smtp.server.trim().is_empty() || settings.smtp.email.trim().is_empty() {
        return Err(ValidationError::new("smtp_required_for_recipients"));
    }
    if !settings.smtp.email.validate_email() {
        return Err(ValidationError::new("invalid_sender_email"));
    }
    Ok(())
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `STATWATCH__` 前缀的环境变量，然后校验。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载并通过校验的配置
    /// * `Err(SettingsError)` - 加载或校验失败
    pub fn new() -> Result<Self, SettingsError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Self::environment());

        Self::from_config(builder.build()?)
    }

    /// 环境变量来源，例如 `STATWATCH__SMTP__SERVER`
    ///
    /// 取值一律按原始字符串读取，数值和布尔字段在反序列化时再转换，
    /// 因此 `007` 这样的密码不会被改写。
    /// `STATWATCH__REPORT__RECIPIENTS` 按逗号拆分为列表。
    pub fn environment() -> Environment {
        Environment::with_prefix("STATWATCH").separator("__")
    }

    /// 带有全部默认值的配置构建器
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let builder = Config::builder()
            .set_default("source.url", "https://www.worldometers.info/coronavirus/")?
            .set_default("source.timeout_secs", 30)?
            .set_default(
                "source.user_agent",
                concat!("statwatch/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("report.period_minutes", 60)?
            .set_default("report.country", "")?
            .set_default("report.subject", "COVID-19 Report For Now")?
            .set_default("report.from_label", "COVID-19-Reporter")?
            .set_default("smtp.port", 587)?
            .set_default("smtp.security", "starttls")?
            .set_default("smtp.timeout_secs", 60)?
            .set_default("telegram.api_base", "https://api.telegram.org")?
            .set_default("telegram.timeout_secs", 30)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?;
        Ok(builder)
    }

    /// 从已构建的配置反序列化并校验
    ///
    /// 收件人会被去除首尾空白，空项被丢弃
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let mut settings: Settings = config.try_deserialize()?;
        settings.report.recipients = settings
            .report
            .recipients
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        settings.validate()?;
        Ok(settings)
    }
}
