// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::DeliveryTarget;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败（网络、超时、TLS等）
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 非 2xx 状态码
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
}

/// 解析错误类型
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Empty document")]
    EmptyDocument,

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// 投递错误类型
///
/// 除传输初始化失败外，每个变体都携带失败的投递目标
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Invalid address for {target}: {reason}")]
    InvalidAddress {
        target: DeliveryTarget,
        reason: String,
    },

    #[error("Failed to build message for {target}: {reason}")]
    Message {
        target: DeliveryTarget,
        reason: String,
    },

    #[error("Delivery to {target} failed: {reason}")]
    Send {
        target: DeliveryTarget,
        reason: String,
    },

    #[error("Delivery to {target} rejected: {reason}")]
    Rejected {
        target: DeliveryTarget,
        reason: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl DeliveryError {
    /// 获取失败的投递目标
    pub fn target(&self) -> Option<&DeliveryTarget> {
        match self {
            DeliveryError::InvalidAddress { target, .. }
            | DeliveryError::Message { target, .. }
            | DeliveryError::Send { target, .. }
            | DeliveryError::Rejected { target, .. } => Some(target),
            DeliveryError::Transport(_) => None,
        }
    }
}

/// 轮询周期错误类型
///
/// 任何一个变体都会终止当前周期并结束轮询循环
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}
