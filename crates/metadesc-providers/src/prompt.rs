//! Turns raw page content into a summary prompt.

use metadesc_core::config::schema::{SummaryConfig, CONTENT_PLACEHOLDER};
use metadesc_core::utils::{collapse_whitespace, strip_html_tags, truncate_string};

/// Strip markup, collapse whitespace, cap the length, and wrap the result
/// in the configured template.
///
/// A template without `{content}` gets the content appended after a blank line.
/// `max_content_chars == 0` disables truncation.
pub fn build_summary_prompt(content: &str, config: &SummaryConfig) -> String {
    let text = collapse_whitespace(&strip_html_tags(content));
    let text = if config.max_content_chars > 0 {
        truncate_string(&text, config.max_content_chars)
    } else {
        text
    };

    if config.prompt_template.contains(CONTENT_PLACEHOLDER) {
        config.prompt_template.replace(CONTENT_PLACEHOLDER, &text)
    } else {
        format!("{}\n\n{}", config.prompt_template.trim_end(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(template: &str, max: usize) -> SummaryConfig {
        SummaryConfig {
            max_content_chars: max,
            prompt_template: template.to_string(),
        }
    }

    #[test]
    fn test_default_template_wraps_clean_text() {
        let prompt = build_summary_prompt(
            "<h1>Rust  Guide</h1>\n<p>Learn <em>ownership</em>.</p>",
            &SummaryConfig::default(),
        );
        assert!(prompt.ends_with("Content:\nRust Guide Learn ownership ."));
        assert!(prompt.contains("160 characters"));
        assert!(!prompt.contains('<'));
    }

    #[test]
    fn test_custom_template() {
        let prompt = build_summary_prompt("Hello", &config("Summarize: {content}!", 100));
        assert_eq!(prompt, "Summarize: Hello!");
    }

    #[test]
    fn test_template_without_placeholder_appends() {
        let prompt = build_summary_prompt("Body", &config("Describe this page.\n", 100));
        assert_eq!(prompt, "Describe this page.\n\nBody");
    }

    #[test]
    fn test_truncation() {
        let prompt = build_summary_prompt("abcdefghij", &config("{content}", 6));
        assert_eq!(prompt, "abc...");
    }

    #[test]
    fn test_tiny_limit_never_exceeds_bound() {
        let prompt = build_summary_prompt("abcdefghij", &config("{content}", 2));
        assert_eq!(prompt, "ab");
    }

    #[test]
    fn test_literal_less_than_survives_cleanup() {
        let prompt = build_summary_prompt("Deals: 5 < 6 on <em>all</em> mugs", &config("{content}", 100));
        assert_eq!(prompt, "Deals: 5 < 6 on all mugs");
    }

    #[test]
    fn test_zero_disables_truncation() {
        let long = "word ".repeat(2000);
        let prompt = build_summary_prompt(&long, &config("{content}", 0));
        assert_eq!(prompt.len(), long.trim_end().len());
    }
}
