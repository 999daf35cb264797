// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::{first_matching, marker, spaced_text_of, text_of};
use crate::domain::models::{Field, RawDocument};
use crate::utils::errors::ParseError;
use crate::utils::text_processing::{normalize, normalize_label};
use scraper::{ElementRef, Selector};
use tracing::debug;

/// 全局计数器元素
const COUNTER_MARKER: &str = ".maincounter-number";
/// 计数器标签所在的标题元素
const HEADING_MARKER: &str = "h1, h2, h3, h4, h5, h6";
/// 按国家划分的主结果表
const RESULTS_TABLE_MARKER: &str = "#main_table_countries_today";

/// 空单元格的占位符
const EMPTY_CELL: &str = "-";

/// 提取服务
///
/// 负责从统计页面中提取全局计数器和指定国家的表格行。
/// 选择器在创建时编译一次，之后每个周期复用。
pub struct ExtractionService {
    counter: Selector,
    heading: Selector,
    results_table: Selector,
    table_body: Selector,
    row: Selector,
    cell: Selector,
    header_cell: Selector,
}

impl ExtractionService {
    /// 创建提取服务
    ///
    /// # 返回值
    ///
    /// * `Ok(ExtractionService)` - 所有选择器编译成功
    /// * `Err(ParseError)` - 某个选择器无效
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            counter: marker(COUNTER_MARKER)?,
            heading: marker(HEADING_MARKER)?,
            results_table: marker(RESULTS_TABLE_MARKER)?,
            table_body: marker("tbody")?,
            row: marker("tr")?,
            cell: marker("td")?,
            header_cell: marker("thead th")?,
        })
    }

    /// 提取全局字段
    ///
    /// 每个计数器元素产生一个字段：标签是最近的标题文本，数值是计数器自身的文本。
    /// 顺序与文档顺序一致；没有计数器时返回空列表。
    pub fn extract_global_fields(&self, doc: &RawDocument) -> Vec<Field> {
        let fields: Vec<Field> = doc
            .find(&self.counter)
            .map(|counter| {
                let label = self
                    .heading_for(counter)
                    .map(|heading| normalize_label(&spaced_text_of(heading)))
                    .unwrap_or_default();
                Field::new(label, normalize(&text_of(counter)))
            })
            .collect();

        debug!(count = fields.len(), "Extracted global fields");
        fields
    }

    /// 提取指定国家的表格行
    ///
    /// # 参数
    ///
    /// * `doc` - 解析后的页面
    /// * `country_name` - 国家名称，为空时表示功能关闭
    ///
    /// # 返回值
    ///
    /// * `Some(fields)` - 第一列与国家名称完全匹配（忽略大小写）的第一行，
    ///   其余各列与表头配对
    /// * `None` - 功能关闭、没有结果表或没有匹配行
    pub fn extract_country_row(&self, doc: &RawDocument, country_name: &str) -> Option<Vec<Field>> {
        let wanted = normalize_label(country_name).to_uppercase();
        if wanted.is_empty() {
            return None;
        }

        let table = doc.find_first(&self.results_table)?;
        let body = first_matching(table, &self.table_body)?;

        let row = body.select(&self.row).find(|row| {
            first_matching(*row, &self.cell)
                .map(|cell| normalize_label(&text_of(cell)).to_uppercase() == wanted)
                .unwrap_or(false)
        });

        let Some(row) = row else {
            debug!(country = country_name, "No matching country row");
            return None;
        };

        let headers: Vec<String> = table
            .select(&self.header_cell)
            .map(|th| normalize_label(&spaced_text_of(th)))
            .collect();

        // Column 0 holds the country name itself.
        let fields: Vec<Field> = row
            .select(&self.cell)
            .enumerate()
            .skip(1)
            .map(|(index, cell)| {
                let label = headers.get(index).cloned().unwrap_or_default();
                let value = normalize(&text_of(cell));
                if value.is_empty() {
                    Field::new(label, EMPTY_CELL)
                } else {
                    Field::new(label, value)
                }
            })
            .collect();

        debug!(country = country_name, count = fields.len(), "Extracted country row");
        Some(fields)
    }

    /// 查找计数器的标签标题
    ///
    /// 优先取计数器之前最近的标题（兄弟元素本身或其后代），
    /// 否则取父元素内的第一个标题
    fn heading_for<'a>(&self, counter: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let preceding = counter
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .find_map(|sibling| {
                if self.heading.matches(&sibling) {
                    Some(sibling)
                } else {
                    sibling.select(&self.heading).last()
                }
            });
        if preceding.is_some() {
            return preceding;
        }

        counter
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|parent| first_matching(parent, &self.heading))
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
