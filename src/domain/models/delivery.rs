// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 投递目标
///
/// 邮件收件人或聊天频道，每个目标都可以独立尝试投递。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    Email { address: String },
    ChatChannel { channel_id: String },
}

impl DeliveryTarget {
    /// 渠道名称，用作日志和指标标签
    pub fn channel(&self) -> &'static str {
        match self {
            DeliveryTarget::Email { .. } => "email",
            DeliveryTarget::ChatChannel { .. } => "chat",
        }
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTarget::Email { address } => write!(f, "email:{}", address),
            DeliveryTarget::ChatChannel { channel_id } => write!(f, "chat:{}", channel_id),
        }
    }
}
