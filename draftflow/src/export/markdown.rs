//! Markdown to inline HTML via a fixed substitution table.

use regex::Regex;
use std::sync::LazyLock;

/// Which substitution table to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownFlavor {
    /// Headings h1 to h3, emphasis, list items and paragraph breaks.
    Blog,
    /// Headings h2 and h3, emphasis and line breaks.
    Script,
}

type Rule = (Regex, &'static str);

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    (Regex::new(pattern).expect("valid export regex"), replacement)
}

static H3: LazyLock<Rule> = LazyLock::new(|| rule(r"(?m)^### (.*)$", "<h3>$1</h3>"));
static H2: LazyLock<Rule> = LazyLock::new(|| rule(r"(?m)^## (.*)$", "<h2>$1</h2>"));
static H1: LazyLock<Rule> = LazyLock::new(|| rule(r"(?m)^# (.*)$", "<h1>$1</h1>"));
static BOLD: LazyLock<Rule> = LazyLock::new(|| rule(r"\*\*(.*?)\*\*", "<b>$1</b>"));
static ITALIC: LazyLock<Rule> = LazyLock::new(|| rule(r"\*(.*?)\*", "<i>$1</i>"));
static LIST_ITEM: LazyLock<Rule> = LazyLock::new(|| {
    rule(
        r"(?m)^\s*-\s+(.*)$",
        "<p style=\"margin-left: 20px; text-indent: -20px;\">\u{2022} $1</p>",
    )
});
static PARAGRAPH: LazyLock<Rule> = LazyLock::new(|| rule(r"\n\n", "<br><br>"));
static LINE: LazyLock<Rule> = LazyLock::new(|| rule(r"\n", "<br>"));

fn table(flavor: MarkdownFlavor) -> Vec<&'static Rule> {
    match flavor {
        MarkdownFlavor::Blog => vec![&*H3, &*H2, &*H1, &*BOLD, &*ITALIC, &*LIST_ITEM, &*PARAGRAPH, &*LINE],
        MarkdownFlavor::Script => vec![&*H3, &*H2, &*BOLD, &*ITALIC, &*LINE],
    }
}

/// Applies the flavor's substitutions in order.
#[must_use]
pub fn markdown_to_html(text: &str, flavor: MarkdownFlavor) -> String {
    table(flavor)
        .into_iter()
        .fold(text.to_string(), |acc, (re, replacement)| re.replace_all(&acc, *replacement).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blog_headings() {
        assert_eq!(
            markdown_to_html("# A\n## B\n### C", MarkdownFlavor::Blog),
            "<h1>A</h1><br><h2>B</h2><br><h3>C</h3>"
        );
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            markdown_to_html("**strong** and *soft*", MarkdownFlavor::Blog),
            "<b>strong</b> and <i>soft</i>"
        );
    }

    #[test]
    fn test_blog_list_and_paragraphs() {
        let html = markdown_to_html("Intro\n\n- one\n- two", MarkdownFlavor::Blog);
        assert!(html.starts_with("Intro"));
        assert!(html.contains("\u{2022} one</p>"));
        assert!(html.contains("\u{2022} two</p>"));
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_script_flavor_skips_h1_and_lists() {
        let html = markdown_to_html("# Title\n- item\n\n## Part", MarkdownFlavor::Script);
        assert_eq!(html, "# Title<br>- item<br><br><h2>Part</h2>");
    }
}
