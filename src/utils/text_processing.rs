// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 文本规范化
//!
//! 页面中提取出的文本通常带有换行、缩进和千位分隔符，
//! 这里的函数把它们整理成报告中可以直接展示的形式。

use once_cell::sync::Lazy;
use regex::Regex;

/// 数值形式：可选符号、按三位分组的千位分隔符或连续数字、可选小数部分
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$")
        .expect("Failed to compile numeric regex")
});

/// 规范化字段值
///
/// 去掉首尾空白和换行；如果结果看起来是数字，再去掉千位分隔符。
/// 该函数是幂等的。
///
/// # 参数
///
/// * `raw` - 原始文本
///
/// # 返回值
///
/// 规范化后的文本
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if NUMERIC.is_match(trimmed) {
        trimmed.replace(',', "")
    } else {
        trimmed.to_string()
    }
}

/// 规范化标签文本
///
/// 标题和表头经常被 `<br>` 或换行拆开，这里把连续空白合并为单个空格。
/// 标签中的逗号保持不变。
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
