/// A candidate site proposed by the suggestion agent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestedUrl {
    pub url: String,
    pub site_name: String,
    pub description: String,
    pub estimated_contacts: u64,
}

/// One-click topics offered next to the topic input.
pub const QUICK_TOPICS: [&str; 6] = [
    "Investment Banking Analysts",
    "Management Consulting Teams",
    "Tech Company Leadership",
    "Hedge Fund Managers",
    "Venture Capital Partners",
    "Equity Research Analysts",
];
