use tracing::warn;

use crate::classify::traits::TextGenerator;
use crate::tabs::TabContent;

static NAME_GROUP_PROMPT: &str = std::include_str!("name_group_prompt.txt");

const FALLBACK_NAME: &str = "Unnamed Group";

/// Produce a short display name for one cluster of tabs.
///
/// The model is asked once with up to `max_titles` member titles; a failed
/// call or an unusable reply falls back to the host of the first member's
/// URL. Either way the result is capped to `max_len` characters and the
/// request never fails because of naming.
#[tracing::instrument(
    name = "Naming a tab group",
    level = "debug",
    skip(generator, tabs)
)]
pub async fn name_tab_group<G: TextGenerator>(
    generator: &G,
    tabs: &[TabContent],
    max_titles: usize,
    max_len: usize,
) -> String {
    let prompt = build_name_prompt(tabs, max_titles);
    let name = match generator.generate(&prompt).await {
        Ok(raw) => clean_name(&raw, max_len),
        Err(e) => {
            warn!("Error generating a group name, using the fallback: {e}");
            None
        }
    };
    name.unwrap_or_else(|| fallback_name(tabs).chars().take(max_len).collect())
}

/// List up to `max_titles` member titles under the naming instructions.
fn build_name_prompt(tabs: &[TabContent], max_titles: usize) -> String {
    let titles = tabs
        .iter()
        .take(max_titles)
        .map(|tab| format!("- {}", tab.title))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{NAME_GROUP_PROMPT}\nTab titles:\n{titles}\n\nRespond with ONLY the group name, nothing else:"
    )
}

/// Trim the reply, drop surrounding quotes, and cap the length. Returns
/// `None` when nothing usable is left.
fn clean_name(raw: &str, max_len: usize) -> Option<String> {
    let name = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    if name.is_empty() {
        return None;
    }
    Some(name.chars().take(max_len).collect())
}

/// Deterministic name when the model cannot be used: the host segment of the
/// first member's URL.
fn fallback_name(tabs: &[TabContent]) -> String {
    tabs.first()
        .and_then(|tab| host_of(&tab.url))
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

fn host_of(url: &str) -> Option<&str> {
    url.split('/').nth(2).filter(|host| !host.is_empty())
}
