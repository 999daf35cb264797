// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::ParseError;
use scraper::{ElementRef, Html, Selector};

/// 解析后的页面文档
///
/// 只在一个轮询周期的提取阶段内存在。`scraper::Html` 不是 `Send`，
/// 因此不能跨越 `.await` 持有。
pub struct RawDocument {
    html: Html,
}

impl RawDocument {
    /// 解析页面标记
    ///
    /// HTML 解析本身是容错的，只有空白内容会被视为解析失败
    pub fn parse(markup: &str) -> Result<Self, ParseError> {
        if markup.trim().is_empty() {
            return Err(ParseError::EmptyDocument);
        }
        Ok(Self {
            html: Html::parse_document(markup),
        })
    }

    /// 按标记查找所有元素（文档顺序）
    pub fn find<'a>(&'a self, marker: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(marker)
    }

    /// 按标记查找第一个元素
    pub fn find_first<'a>(&'a self, marker: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(marker).next()
    }
}

/// 编译选择器
pub fn marker(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::InvalidSelector(format!("{}: {}", css, e)))
}

/// 元素的原始文本（所有文本节点直接拼接）
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// 元素文本，文本节点之间以空格分隔，适用于可能被 `<br>` 拆开的标签
pub fn spaced_text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// 第 `n` 个匹配标记的后代元素（从 0 开始）
pub fn nth_matching<'a>(element: ElementRef<'a>, marker: &Selector, n: usize) -> Option<ElementRef<'a>> {
    element.select(marker).nth(n)
}

/// 第一个匹配标记的后代元素
pub fn first_matching<'a>(element: ElementRef<'a>, marker: &Selector) -> Option<ElementRef<'a>> {
    nth_matching(element, marker, 0)
}
