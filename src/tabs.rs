use serde::{Deserialize, Serialize};

/// Content captured from one open browser tab, as sent by the extension.
///
/// `tab_id` is assigned by the caller and only has to be unique within a
/// single request; nothing is remembered across requests.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TabContent {
    pub tab_id: i64,
    pub url: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl TabContent {
    /// Build the string handed to the embedding model: the title plus the
    /// page text truncated to `max_text_len` characters, so a long body
    /// cannot drown out the title's signal.
    pub fn embedding_input(&self, max_text_len: usize) -> String {
        let body: String = self.text.chars().take(max_text_len).collect();
        format!("Title: {}\nContent: {}", self.title, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(title: &str, text: &str) -> TabContent {
        TabContent {
            tab_id: 1,
            url: "https://example.com/page".to_string(),
            title: title.to_string(),
            text: text.to_string(),
            keywords: Vec::new(),
        }
    }

    #[test]
    fn combines_title_and_body() {
        let input = tab("Rust Book", "Ownership is a core concept").embedding_input(1000);
        assert_eq!(input, "Title: Rust Book\nContent: Ownership is a core concept");
    }

    #[test]
    fn truncates_body_by_characters() {
        let input = tab("T", &"a".repeat(2000)).embedding_input(1000);
        assert_eq!(input, format!("Title: T\nContent: {}", "a".repeat(1000)));
    }

    #[test]
    fn truncation_is_safe_on_multibyte_text() {
        let input = tab("T", "日本語のページ").embedding_input(3);
        assert_eq!(input, "Title: T\nContent: 日本語");
    }

    #[test]
    fn empty_title_and_text_yield_minimal_string() {
        let input = tab("", "").embedding_input(1000);
        assert_eq!(input, "Title: \nContent: ");
    }

    #[test]
    fn deserializes_wire_format_with_optional_keywords() {
        let tab: TabContent = serde_json::from_str(
            r#"{"tabId": 7, "url": "https://a.dev/", "title": "A", "text": "body"}"#,
        )
        .unwrap();
        assert_eq!(tab.tab_id, 7);
        assert!(tab.keywords.is_empty());
    }
}
