//! Offline provider. Word-list sentiment and capitalization-based entity spotting.
//!
//! Used when no inference token is configured. Crude, but deterministic and
//! free of network access.

use crate::domain::{DomainError, Sentiment};
use crate::ports::{EntityTagger, ModelProvider, SentimentModel};
use std::sync::Arc;

const POSITIVE_WORDS: &[&str] = &[
    "afford", "bonus", "comfortable", "confident", "earn", "earned", "excited", "gain", "gained",
    "good", "great", "grow", "growth", "happy", "increase", "love", "paid", "profit", "raise",
    "save", "saved", "saving", "secure", "surplus", "thrilled", "win",
];

const NEGATIVE_WORDS: &[&str] = &[
    "anxious", "bankrupt", "behind", "broke", "debt", "declined", "default", "deficit", "expensive",
    "fee", "fees", "late", "lose", "lost", "loss", "overdraft", "overdue", "penalty", "scared",
    "short", "stress", "stressed", "struggle", "struggling", "worried", "worry",
];

/// Capitalized words that are not names when they open a sentence or stand alone.
const STOP_WORDS: &[&str] = &[
    "A", "An", "And", "Are", "Can", "Could", "Do", "Does", "For", "How", "I", "I'm", "If", "In",
    "Is", "It", "My", "Of", "On", "Or", "Should", "So", "The", "To", "We", "What", "When",
    "Where", "Which", "Who", "Why", "Will", "Would", "You",
];

#[derive(Debug, Default)]
pub struct LexiconModelProvider;

impl LexiconModelProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ModelProvider for LexiconModelProvider {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn load_sentiment(&self) -> Result<Arc<dyn SentimentModel>, DomainError> {
        Ok(Arc::new(LexiconSentiment))
    }

    async fn load_tagger(&self) -> Result<Arc<dyn EntityTagger>, DomainError> {
        Ok(Arc::new(CapitalizedRunTagger))
    }
}

struct LexiconSentiment;

#[async_trait::async_trait]
impl SentimentModel for LexiconSentiment {
    async fn classify(&self, text: &str) -> Result<Sentiment, DomainError> {
        Ok(score_sentiment(text))
    }
}

struct CapitalizedRunTagger;

#[async_trait::async_trait]
impl EntityTagger for CapitalizedRunTagger {
    async fn tag(&self, text: &str) -> Result<Vec<String>, DomainError> {
        Ok(extract_entities(text))
    }
}

fn score_sentiment(text: &str) -> Sentiment {
    let mut score = 0i32;
    for word in text.split(|c: char| !c.is_alphanumeric() && c != '\'') {
        let word = word.to_lowercase();
        if POSITIVE_WORDS.contains(&word.as_str()) {
            score += 1;
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            score -= 1;
        }
    }
    match score {
        s if s > 0 => Sentiment::Positive,
        s if s < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

/// Runs of capitalized tokens ("Roth IRA", "Bank of America" is split at "of"),
/// plus currency amounts like `$500` or `€1,200.50`. Text order.
fn extract_entities(text: &str) -> Vec<String> {
    let mut entities = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    let mut sentence_start = true;

    for raw in text.split_whitespace() {
        let token =
            raw.trim_matches(|c: char| !c.is_alphanumeric() && !is_currency(c) && c != '\'');
        let ends_sentence = raw.ends_with(['.', '!', '?']);
        let breaks_run = ends_sentence || raw.ends_with([',', ';', ':']);

        if is_amount(token) {
            flush(&mut run, &mut entities);
            entities.push(token.trim_end_matches(['.', ',']).to_string());
        } else if is_capitalized(token) && !(sentence_start && STOP_WORDS.contains(&token)) {
            if !STOP_WORDS.contains(&token) || !run.is_empty() {
                run.push(token);
            }
        } else {
            flush(&mut run, &mut entities);
        }

        if breaks_run {
            flush(&mut run, &mut entities);
        }
        sentence_start = ends_sentence;
    }
    flush(&mut run, &mut entities);
    entities
}

fn flush(run: &mut Vec<&str>, entities: &mut Vec<String>) {
    if !run.is_empty() {
        entities.push(run.join(" "));
        run.clear();
    }
}

fn is_currency(c: char) -> bool {
    matches!(c, '$' | '€' | '£' | '¥' | '₹')
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_uppercase())
}

fn is_amount(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if is_currency(c) => {
            let rest = chars.as_str();
            rest.chars().next().is_some_and(|c| c.is_ascii_digit())
                && rest.chars().all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | 'k' | 'K'))
        }
        _ => false,
    }
}
