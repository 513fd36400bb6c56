use crate::utils::stop_words::is_stop_word;

/// Tokens with this many characters or fewer are discarded
pub const MAX_DISCARDED_TOKEN_CHARS: usize = 2;

/// Fused forms the word tokenizer splits in two, e.g. `cannot` -> `can not`
const FUSED_FORMS: &[(&str, &str, &str)] = &[
    ("cannot", "can", "not"),
    ("gimme", "gim", "me"),
    ("gonna", "gon", "na"),
    ("gotta", "got", "ta"),
    ("lemme", "lem", "me"),
    ("wanna", "wan", "na"),
];

/// TextNormalizer
/// Converts raw text into the canonical token sequence used on both sides of
/// the matcher (corpus questions and user queries).
///
/// Steps, in order:
/// 1. lowercase
/// 2. strip every character that is neither alphanumeric nor whitespace
/// 3. split into word tokens
/// 4. drop English stop words and tokens of 2 characters or fewer
/// 5. join the survivors with single spaces
///
/// The normalizer holds no state, so one instance can be shared freely
/// between threads.
///
/// # Examples
/// ```
/// use faq_matcher::utils::normalizer::TextNormalizer;
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("What is Python?"), "python");
/// assert_eq!(normalizer.normalize("Tell me about Python!"), "tell python");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        TextNormalizer
    }

    /// Normalize text into a space separated token string
    /// The result may be empty
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Normalize text and return the surviving tokens in order
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let stripped: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        tokenize(&stripped)
            .into_iter()
            .filter(|token| Self::keep_token(token))
            .map(str::to_string)
            .collect()
    }

    #[inline]
    fn keep_token(token: &str) -> bool {
        token.chars().count() > MAX_DISCARDED_TOKEN_CHARS && !is_stop_word(token)
    }
}

/// Normalize text with the default normalizer
#[inline]
pub fn normalize(text: &str) -> String {
    TextNormalizer.normalize(text)
}

/// Word tokenizer for already lowercased, punctuation free text
/// Splits on whitespace and separates the fused forms listed in `FUSED_FORMS`
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        match FUSED_FORMS.iter().find(|(fused, _, _)| *fused == word) {
            Some((_, head, tail)) => {
                tokens.push(*head);
                tokens.push(*tail);
            }
            None => tokens.push(word),
        }
    }
    tokens
}
