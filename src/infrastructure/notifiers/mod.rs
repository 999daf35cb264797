// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod smtp;
pub mod telegram;

pub use smtp::SmtpEmailSender;
pub use telegram::TelegramChatSender;
