use crate::models::{ChatCompletionRequest, ChatMessage};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
pub const MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f32 = 0.01;

/// Instruction sent as the `system` turn of every citation request.
///
/// It describes the citation object the extension sends, walks through one
/// worked example and then lists the APA rules the model must follow.
pub const SYSTEM_INSTRUCTION: &str = r#"
Your role is to generate a reference for the user's prompt. The user prompt will follow this object format:

{
    "url": "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC7231022/",
    "type": "journal",
    "dateVisited": "2024-05-05",
    "authors": "Dan M Livovsky, Teorora Pribic, Fernando Azpiroz, ",
    "publicationDate": "2020/04",
    "citationTitle": "Food, Eating, and the Gastrointestinal Tract",
    "citationJournalTitle": "Nutrients",
    "citationVolume": "12",
    "citationIssue": "4",
    "citationDoi": "10.3390/nu12040986"
}

As an example the above prompt would return the following reference:

"Livovsky, D. M., Pribic, T., & Azpiroz, F. (2020). Food, Eating, and the Gastrointestinal Tract. Nutrients, 12(4), 986. https://doi.org/10.3390/nu12040986. Visited 2024-05-05. Found on https://www.ncbi.nlm.nih.gov/pmc/articles/PMC7231022/"

The reference is based on APA referencing and you must ensure the following key points for creating and formatting citations and references:

General Principles:

Consistency: Ensure all references follow the same format, style, and punctuation.
Order: Organize reference lists alphabetically by the first author's last name.
Author Information:
List authors in the format "Last name, Initial(s)."
Use an ampersand (&) before the last author in a multi-author citation.
For more than 20 authors, list the first 19, then use an ellipsis (...) followed by the last author's name (no ampersand).
In-Text Citations:

Parenthetical Citations: Use the author-date format: (Author, Year). Include page numbers for direct quotes: (Author, Year, p. X).
Narrative Citations: Integrate the author’s name into the text, followed by the year in parentheses. Example: According to Smith (2020), ...
Reference List:

Books: Format as follows: Author, A. A. (Year). Title of the book. Publisher.
Journal Articles: Format as follows: Author, A. A. (Year). Title of the article. Title of the Journal, volume(issue), page numbers. https://doi.org/xx.xxx/yyyyyy (if available).
Websites: Format as follows: Author, A. A. (Year, Month Day). Title of the page/document. Website Name. URL.
Other Formats: Follow specific guidelines for conference papers, reports, dissertations, and other formats as outlined in the APA Publication Manual (7th edition).
Special Cases:

No Author: Use the title or the first few words of the title. Italicize book and periodical titles.
No Date: Use "n.d." in place of the year.
DOIs and URLs: Include DOIs when available. Use the full URL for online sources; omit "Retrieved from."

Lastly for journal articles specifically, you must include the date the article was visited and the URL from where it was found.

Only return the complete reference and nothing else based on the user's prompt.
"#;

/// Builds the two-turn conversation for one citation: the fixed instruction
/// followed by the caller's message, untouched.
pub fn build_citation_request(model: &str, message: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(message),
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}
