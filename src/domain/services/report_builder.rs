// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::{Field, Report};

const COMMON_HEADER: &str = "Common:";

/// 构建报告
///
/// 全局字段非空时输出 `Common:` 分节；国家字段存在且非空时输出
/// `For country - <name>` 分节，两节之间以空行分隔。
/// 两节都为空时返回空报告，是否跳过投递由调用方决定。
///
/// # 参数
///
/// * `global` - 全局字段
/// * `country` - 国家字段，`None` 表示功能关闭或未匹配
/// * `country_name` - 配置中的国家名称，原样用于分节标题
pub fn build_report(global: &[Field], country: Option<&[Field]>, country_name: &str) -> Report {
    let mut lines = Vec::new();

    if !global.is_empty() {
        lines.push(COMMON_HEADER.to_string());
        lines.push(String::new());
        lines.extend(
            global
                .iter()
                .map(|field| format!("- {} {}", field.label(), field.value())),
        );
    }

    if let Some(country) = country.filter(|fields| !fields.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("For country - {}", country_name));
        lines.push(String::new());
        lines.extend(
            country
                .iter()
                .map(|field| format!("- {}: {}", field.label(), field.value())),
        );
    }

    Report::new(lines)
}
