//! Natural-language instructions sent to the agents.

/// Instruction asking the research agent to extract contacts from `urls`.
pub fn scrape_instruction(urls: &[String]) -> String {
    let listing = urls
        .iter()
        .enumerate()
        .map(|(index, url)| format!("URL {}: {}", index + 1, url))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Research the following websites and extract analyst contact information \
         (name, email, company, role) from each. Use your web search capabilities to \
         access these pages and find contact data:\n\n{listing}\n\n\
         Return all contacts found with their source URLs and a status for each contact."
    )
}

/// Instruction asking the suggestion agent for candidate sites about `topic`.
pub fn suggestion_instruction(topic: &str) -> String {
    format!(
        "Find the best website URLs where I can find analyst contact information for: \
         {topic}. Look for team pages, about pages, staff directories, and professional \
         listings. Return real, accessible URLs."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_numbered_from_one() {
        let text = scrape_instruction(&[
            "https://a.com".to_string(),
            "https://b.com/team".to_string(),
        ]);
        assert!(text.contains("find contact data:\n\nURL 1: https://a.com\nURL 2: https://b.com/team\n\nReturn all contacts"));
        assert!(text.starts_with("Research the following websites"));
    }

    #[test]
    fn topic_is_embedded_verbatim() {
        let text = suggestion_instruction("fintech equity research");
        assert!(text.contains("information for: fintech equity research. Look for team pages"));
    }
}
