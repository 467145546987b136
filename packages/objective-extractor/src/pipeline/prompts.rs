//! LLM prompts for search-term derivation and page classification.

/// Prompt asking for a short site-map search parameter.
pub const SEARCH_TERM_PROMPT: &str = r#"The map function generates a list of URLs from a website and it accepts a search parameter.
Based on the objective of: {objective}, come up with a 1-2 word search parameter that will help us find the information we need.
Only respond with 1-2 words nothing else."#;

/// System instruction for the page classifier.
pub const CLASSIFY_SYSTEM_PROMPT: &str =
    "Only respond in raw JSON or exactly 'Objective not met'. Do NOT include commentary or <think> tags.";

/// Instructions asking whether scraped content satisfies the objective.
///
/// The objective and page content are appended by [`format_classify_prompt`].
pub const CLASSIFY_PROMPT: &str = r#"Given the following scraped content and objective, determine if the objective is met.
If it is, extract the relevant information in a simple JSON format.
If the objective is not met, respond with exactly 'Objective not met'.

JSON format:
{
    "found": true,
    "data": {
        // extracted information here
    }
}"#;

/// Format the search-term prompt.
pub fn format_search_term_prompt(objective: &str) -> String {
    SEARCH_TERM_PROMPT.replace("{objective}", objective)
}

/// Format the classification prompt.
///
/// Neither argument is searched for placeholders.
pub fn format_classify_prompt(objective: &str, content: &str) -> String {
    format!(
        "{}\n\nObjective: {}\nScraped content: {}",
        CLASSIFY_PROMPT, objective, content
    )
}
