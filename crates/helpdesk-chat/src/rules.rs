//! Ordered intent rules.
//!
//! Classification walks [`RULES`] top to bottom over the lowercased message
//! and the session's customer context; the first matcher that fires wins,
//! and anything unmatched becomes [`Intent::Fallback`]. The order is part
//! of the contract: "hello, tell me about mongodb" must hit the name rule,
//! not the greeting rule.

use regex::Regex;
use std::sync::LazyLock;

use helpdesk_storage::CustomerField;

use crate::session::CustomerContext;

// =============================================================================
// Compiled patterns and keyword tables (compiled once, reused across calls)
// =============================================================================

/// "customer 42", "customern42", "CUSTOMER  7" ...
static CUSTOMER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)customer[n]*\s*(\d+)").expect("Invalid id regex"));

/// Lead-in phrases that introduce a customer name (or a known topic).
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:about|details of|tell me about|who is|show details for|give me details of)\s+([a-z\s]+)")
        .expect("Invalid name regex")
});

/// Pronoun follow-ups that refer back to the last customer.
static PRONOUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)details of him|details about him|details of her|details about her|details of the customer|details about the customer",
    )
    .expect("Invalid pronoun regex")
});

/// Keyword-to-field synonym table.
///
/// Declaration order is load-bearing: the first contained keyword wins, so
/// "mail" must precede "email" only because both resolve to the same field,
/// but "last contact" must precede nothing that would shadow it.
pub static SYNONYMS: &[(&str, CustomerField)] = &[
    ("mail", CustomerField::Email),
    ("email", CustomerField::Email),
    ("mobile", CustomerField::Phone),
    ("mobile number", CustomerField::Phone),
    ("contact number", CustomerField::Phone),
    ("phone", CustomerField::Phone),
    ("status", CustomerField::Status),
    ("company", CustomerField::Company),
    ("notes", CustomerField::Notes),
    ("last contact", CustomerField::LastContact),
    ("contacted", CustomerField::LastContact),
    ("source", CustomerField::Source),
];

/// Phrases that mark a message as small talk.
pub static GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good evening",
    "good afternoon",
    "good night",
    "how are you",
    "thanks",
    "thank you",
    "thank u",
    "bye",
    "goodbye",
    "see you later",
];

/// Topics the assistant may discuss without touching the customer store.
pub static KNOWN_TOPICS: &[&str] = &[
    "chatbot",
    "crm",
    "mongodb",
    "database",
    "databases",
    "programming",
    "technology",
    "sports",
    "entertainment",
    "science",
    "ai",
    "artificial intelligence",
    "bot",
];

// =============================================================================
// Intents and the rule list
// =============================================================================

/// What a message asks for, with any anchors resolved from context.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Look up a customer by explicit id.
    CustomerId(i64),
    /// Fetch the customer with the smallest id after the given one.
    NextCustomer(i64),
    /// A known general topic: delegate to the model, skip the store.
    KnownTopic,
    /// Look up a customer by name fragment.
    NameLookup(String),
    /// Fetch a single field of the anchored customer.
    FieldLookup(CustomerField, i64),
    /// Re-fetch the anchored customer ("details about him").
    LastCustomer(i64),
    /// Small talk with a canned reply.
    Greeting,
    /// Everything else: delegate message + history to the model.
    Fallback,
}

/// One ordered classification rule.
pub struct Rule {
    pub name: &'static str,
    matcher: fn(&str, &CustomerContext) -> Option<Intent>,
}

/// The rule cascade, highest priority first.
pub static RULES: &[Rule] = &[
    Rule {
        name: "customer-id",
        matcher: match_customer_id,
    },
    Rule {
        name: "next-customer",
        matcher: match_next_customer,
    },
    Rule {
        name: "name-lookup",
        matcher: match_name_lookup,
    },
    Rule {
        name: "field-lookup",
        matcher: match_field_lookup,
    },
    Rule {
        name: "last-customer",
        matcher: match_last_customer,
    },
    Rule {
        name: "greeting",
        matcher: match_greeting,
    },
];

/// Classify a lowercased message against the rule cascade.
pub fn classify(message: &str, context: &CustomerContext) -> Intent {
    for rule in RULES {
        if let Some(intent) = (rule.matcher)(message, context) {
            return intent;
        }
    }
    Intent::Fallback
}

fn match_customer_id(message: &str, _context: &CustomerContext) -> Option<Intent> {
    let caps = CUSTOMER_ID_RE.captures(message)?;
    let id: i64 = caps[1].parse().ok()?;
    Some(Intent::CustomerId(id))
}

fn match_next_customer(message: &str, context: &CustomerContext) -> Option<Intent> {
    if !message.contains("next customer") {
        return None;
    }
    // Without an anchor there is nothing to paginate from; fall through.
    context.last_customer_id.map(Intent::NextCustomer)
}

fn match_name_lookup(message: &str, _context: &CustomerContext) -> Option<Intent> {
    let caps = NAME_RE.captures(message)?;
    let name = caps[1].trim().to_string();
    if name.is_empty() {
        return None;
    }
    // Bare pronoun captures belong to the last-customer rule below, which
    // would otherwise be unreachable.
    if matches!(name.as_str(), "him" | "her" | "the customer") {
        return None;
    }
    if KNOWN_TOPICS.contains(&name.as_str()) {
        return Some(Intent::KnownTopic);
    }
    Some(Intent::NameLookup(name))
}

fn match_field_lookup(message: &str, context: &CustomerContext) -> Option<Intent> {
    let id = context.last_customer_id?;
    for (keyword, field) in SYNONYMS {
        if message.contains(keyword) {
            return Some(Intent::FieldLookup(*field, id));
        }
    }
    None
}

fn match_last_customer(message: &str, context: &CustomerContext) -> Option<Intent> {
    if !PRONOUN_RE.is_match(message) {
        return None;
    }
    context.last_customer_id.map(Intent::LastCustomer)
}

fn match_greeting(message: &str, _context: &CustomerContext) -> Option<Intent> {
    GREETINGS
        .iter()
        .any(|greeting| message.contains(greeting))
        .then_some(Intent::Greeting)
}
