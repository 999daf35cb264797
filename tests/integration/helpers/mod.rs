// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use statwatch::config::settings::{SourceSettings, TelegramSettings};
use statwatch::domain::models::DeliveryTarget;
use statwatch::domain::services::delivery_service::{EmailMessage, EmailSender};
use statwatch::utils::errors::DeliveryError;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STATS_PATH: &str = "/coronavirus/";

/// 只有头条计数器、没有国家表格的页面
pub const COUNTERS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <div id="maincounter-wrap">
        <h1>Cases</h1>
        <div class="maincounter-number"><span>1,234</span></div>
    </div>
    <div id="maincounter-wrap">
        <h1>Deaths</h1>
        <div class="maincounter-number"><span>56</span></div>
    </div>
</body>
</html>"#;

/// 带国家表格的页面
pub const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <div><h1>Coronavirus Cases:</h1><div class="maincounter-number">1,234</div></div>
    <div><h1>Deaths:</h1><div class="maincounter-number">56</div></div>
    <div><h1>Recovered:</h1><div class="maincounter-number">789</div></div>
    <table id="main_table_countries_today">
        <thead>
            <tr><th>Country,<br>Other</th><th>Total<br>Cases</th><th>New<br>Cases</th></tr>
        </thead>
        <tbody>
            <tr><td><a href="country/italy/">Italy</a></td><td>12,462</td><td></td></tr>
            <tr><td>Spain</td><td>2,277</td><td>+100</td></tr>
        </tbody>
    </table>
</body>
</html>"#;

pub async fn mount_stats_page(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub fn source_settings(server: &MockServer) -> SourceSettings {
    SourceSettings {
        url: format!("{}{}", server.uri(), STATS_PATH),
        timeout_secs: 5,
        user_agent: "statwatch-test".to_string(),
    }
}

pub fn telegram_settings(api_base: &str) -> TelegramSettings {
    TelegramSettings {
        token: Some("TEST_TOKEN".to_string()),
        chat_id: Some("42".to_string()),
        proxy_url: None,
        api_base: api_base.to_string(),
        timeout_secs: 5,
    }
}

/// 记录所有邮件的发送器
#[derive(Default)]
pub struct RecordingEmail {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

#[async_trait]
impl EmailSender for RecordingEmail {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Send {
                target: DeliveryTarget::Email {
                    address: message.to.clone(),
                },
                reason: "relay refused".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
