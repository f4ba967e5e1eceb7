// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! HTML 转 markdown
//!
//! 只覆盖正文提取需要的元素：标题、段落、链接、图片、列表、强调、代码和换行。
//! 链接和图片保持原样输出，噪声交给清洗管道处理。

use scraper::{node::Node, ElementRef, Html};

/// 不输出任何内容的元素
const SKIPPED: &[&str] = &[
    "head", "script", "style", "noscript", "svg", "template", "iframe", "canvas",
];

/// 块级元素，前后各留一个空行
const BLOCKS: &[&str] = &[
    "p", "div", "section", "article", "main", "header", "footer", "nav", "aside", "table",
    "form", "figure", "blockquote", "dl",
];

/// 将 HTML 文档转换为 markdown
pub fn html_to_markdown(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut writer = MarkdownWriter::default();
    writer.walk(document.root_element());
    writer.buf.trim().to_string()
}

#[derive(Default)]
struct MarkdownWriter {
    buf: String,
    list_depth: usize,
    in_pre: bool,
}

impl MarkdownWriter {
    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        match name {
            _ if SKIPPED.contains(&name) => {}
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let text = self.render_inline(element).replace('\n', " ");
                self.block();
                self.buf.push_str(&"#".repeat(level));
                self.buf.push(' ');
                self.buf.push_str(&text);
                self.block();
            }
            "br" => self.buf.push('\n'),
            "hr" => {
                self.block();
                self.buf.push_str("---");
                self.block();
            }
            "ul" | "ol" => {
                self.block();
                self.list_depth += 1;
                self.walk(element);
                self.list_depth -= 1;
                self.block();
            }
            "li" => {
                self.line();
                self.buf
                    .push_str(&"  ".repeat(self.list_depth.saturating_sub(1)));
                self.buf.push_str("* ");
                self.walk(element);
                self.line();
            }
            "tr" => {
                self.line();
                self.walk(element);
                self.line();
            }
            "td" | "th" => {
                self.walk(element);
                self.buf.push(' ');
            }
            "a" => {
                let text = self.render_inline(element);
                match element.value().attr("href").map(str::trim) {
                    Some(href) if !href.is_empty() => {
                        self.buf.push_str(&format!("[{}]({})", text, href));
                    }
                    _ => self.buf.push_str(&text),
                }
            }
            "img" => {
                let alt = element.value().attr("alt").unwrap_or_default().trim();
                let src = element.value().attr("src").unwrap_or_default().trim();
                self.buf.push_str(&format!("![{}]({})", alt, src));
            }
            "strong" | "b" => self.wrap_inline(element, "**"),
            "em" | "i" => self.wrap_inline(element, "*"),
            "code" if !self.in_pre => self.wrap_inline(element, "`"),
            "pre" => {
                self.block();
                self.buf.push_str("```\n");
                self.in_pre = true;
                self.walk(element);
                self.in_pre = false;
                self.line();
                self.buf.push_str("```");
                self.block();
            }
            _ if BLOCKS.contains(&name) => {
                self.block();
                self.walk(element);
                self.block();
            }
            _ => self.walk(element),
        }
    }

    fn wrap_inline(&mut self, element: ElementRef<'_>, marker: &str) {
        let text = self.render_inline(element);
        if text.is_empty() {
            return;
        }
        self.buf.push_str(marker);
        self.buf.push_str(&text);
        self.buf.push_str(marker);
    }

    fn render_inline(&self, element: ElementRef<'_>) -> String {
        let mut writer = MarkdownWriter {
            list_depth: self.list_depth,
            in_pre: self.in_pre,
            ..Default::default()
        };
        writer.walk(element);
        writer.buf.trim().to_string()
    }

    fn push_text(&mut self, text: &str) {
        if self.in_pre {
            self.buf.push_str(text);
            return;
        }

        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let leading = text.starts_with(char::is_whitespace);
        let trailing = text.ends_with(char::is_whitespace);

        if collapsed.is_empty() {
            if leading && !self.at_boundary() {
                self.buf.push(' ');
            }
            return;
        }
        if leading && !self.at_boundary() {
            self.buf.push(' ');
        }
        self.buf.push_str(&collapsed);
        if trailing {
            self.buf.push(' ');
        }
    }

    fn at_boundary(&self) -> bool {
        self.buf.is_empty() || self.buf.ends_with(char::is_whitespace)
    }

    /// 保证当前位于新的一行
    fn line(&mut self) {
        trim_trailing_spaces(&mut self.buf);
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// 保证前面有一个空行
    fn block(&mut self) {
        self.line();
        if !self.buf.is_empty() && !self.buf.ends_with("\n\n") {
            self.buf.push('\n');
        }
    }
}

fn trim_trailing_spaces(buf: &mut String) {
    let trimmed = buf.trim_end_matches(' ').len();
    buf.truncate(trimmed);
}
