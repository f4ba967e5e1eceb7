// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Markdown 清洗管道
//!
//! 按固定顺序对抓取到的 markdown 执行 12 个确定性的清洗步骤。
//! 后面的步骤依赖前面的步骤已经移除的噪声，因此顺序不可调换。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::crawl::CleanedDocument;

/// 默认的截断标题（“联络询问”）
pub const DEFAULT_STOP_HEADING: &str = "連絡詢問";

static SCRIPT_WRAPPED_IMAGE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[!\[.*?\]\(.*?\)\]\(javascript:.*?\)")
        .expect("Failed to compile script image link regex")
});

static EMPTY_ALT_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\]\(.*?\)").expect("Failed to compile empty image regex"));

static INLINE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]*?)\]\((?:https?|javascript).*?\)")
        .expect("Failed to compile inline link regex")
});

static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?|ftp)://[^\s\)\]\}]+").expect("Failed to compile bare url regex")
});

// 逐个应用，顺序与脚本残留出现的嵌套方式有关
static SCRIPT_FRAGMENTS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"\.concat\([^\)]*\)").expect("Failed to compile concat regex"),
        Regex::new(r"encodeURIComponent\([^\)]*\)").expect("Failed to compile encode regex"),
        Regex::new(r"document\.title").expect("Failed to compile document.title regex"),
        Regex::new(r"javascript:[^ \n\)]*").expect("Failed to compile javascript regex"),
    ]
});

static TRAILING_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\?\)+[;)]*").expect("Failed to compile paren regex"));

static ORPHAN_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\*\s*$").expect("Failed to compile bullet regex"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Failed to compile blank line regex"));

static SPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" {2,}").expect("Failed to compile space regex"));

const TOP_HEADING_MARKER: &str = "# ";

/// Markdown 清洗器
///
/// 纯函数式：相同输入总是得到相同输出，不做任何 I/O，也不会失败。
#[derive(Debug, Clone)]
pub struct MarkdownSanitizer {
    /// 匹配 `##` 截断标题
    stop_heading: Regex,
}

impl Default for MarkdownSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_HEADING)
    }
}

impl MarkdownSanitizer {
    /// 创建清洗器
    ///
    /// # 参数
    ///
    /// * `stop_heading` - 二级标题文本，文档从该标题起被截断
    pub fn new(stop_heading: &str) -> Self {
        let pattern = format!(r"##\s*{}", regex::escape(stop_heading));
        Self {
            stop_heading: Regex::new(&pattern).expect("escaped heading is a valid regex"),
        }
    }

    /// 执行完整的清洗管道
    pub fn sanitize(&self, raw: &str) -> CleanedDocument {
        // 1-2. 图片
        let text = SCRIPT_WRAPPED_IMAGE_LINK.replace_all(raw, "");
        let text = EMPTY_ALT_IMAGE.replace_all(&text, "").into_owned();

        // 3. 联络区块之后全部丢弃
        let mut text = self.truncate_at_stop_heading(text);

        // 4-5. 链接
        text = INLINE_LINK.replace_all(&text, "${1}").into_owned();
        text = BARE_URL.replace_all(&text, "").into_owned();

        // 6-7. 脚本残留
        for fragment in SCRIPT_FRAGMENTS.iter() {
            text = fragment.replace_all(&text, "").into_owned();
        }
        text = TRAILING_PARENS.replace_all(&text, "").into_owned();

        // 8-10. 空白
        text = ORPHAN_BULLET.replace_all(&text, "").into_owned();
        text = BLANK_LINES.replace_all(&text, "\n\n").into_owned();
        text = SPACE_RUNS.replace_all(&text, " ").into_owned();

        // 11-12.
        let text = drop_leading_boilerplate(&text).trim();

        CleanedDocument::new(text)
    }

    fn truncate_at_stop_heading(&self, mut text: String) -> String {
        if let Some(found) = self.stop_heading.find(&text) {
            text.truncate(found.start());
        }
        text
    }
}

/// 丢弃第一个 `# ` 之前的内容（导航、页眉等）
fn drop_leading_boilerplate(text: &str) -> &str {
    match text.find(TOP_HEADING_MARKER) {
        Some(start) => &text[start..],
        None => text,
    }
}
