//! Reply text composition.
//!
//! Pure functions from lookup results to the strings users see. The emoji
//! labels are part of the user-facing contract; the widget strips them
//! before text-to-speech.

use helpdesk_storage::{CustomerField, CustomerRecord};

/// Render a full customer record with labelled fields in fixed order.
pub fn format_customer(record: &CustomerRecord) -> String {
    let last_contact = record
        .last_contact
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "😊 Sure! Here's what I found:\n\
         📌 ID: {}\n\
         🙂 Name: {}\n\
         📧 Email: {}\n\
         📱 Phone: {}\n\
         🏢 Company: {}\n\
         📝 Status: {}\n\
         🗓️ Last Contact: {}\n\
         💡 Source: {}\n\
         📝 Notes: {}",
        record.id,
        record.name,
        or_na(record.email.as_deref()),
        or_na(record.phone.as_deref()),
        or_na(record.company.as_deref()),
        or_na(record.status.as_deref()),
        last_contact,
        or_na(record.source.as_deref()),
        or_na(record.notes.as_deref()),
    )
}

/// Render a single-field answer: `PHONE of customer 42: +1-555-0100`.
pub fn format_field(field: CustomerField, customer_id: i64, value: Option<&str>) -> String {
    format!(
        "😊 {} of customer {}: {}",
        field.display_name(),
        customer_id,
        value.unwrap_or("N/A")
    )
}

/// Canned greeting replies, more specific phrases first.
pub fn greeting_reply(message: &str) -> &'static str {
    if message.contains("good morning") {
        "☀️ Good morning! How can I help?"
    } else if message.contains("good evening") {
        "🌙 Good evening! What can I do for you?"
    } else if message.contains("good afternoon") {
        "🌤 Good afternoon! How may I assist?"
    } else if message.contains("good night") {
        "😴 Good night! Feel free to ask me anything before bed."
    } else if message.contains("how are you") {
        "🤗 I'm just a bot, but I'm doing great! How can I help you?"
    } else if message.contains("thank") {
        "🙏 You're welcome! Happy to help."
    } else {
        "😊 Hello! How can I assist you today?"
    }
}

/// Prefix a delegated model answer with the friendly marker.
pub fn delegated(content: &str) -> String {
    format!("😊 {}", content)
}

pub fn customer_not_found(id: i64) -> String {
    format!("❌ Sorry, I couldn't find customer {}.", id)
}

pub fn no_next_customer() -> String {
    "❌ Sorry, no next customer found.".to_string()
}

pub fn name_not_found(name: &str) -> String {
    format!("❌ Sorry, couldn't find customer \"{}\".", name)
}

pub fn field_not_found(field: CustomerField) -> String {
    format!("❌ Couldn't find {}.", field.column())
}

pub fn last_customer_missing() -> String {
    "❌ Sorry, couldn't find last customer data.".to_string()
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn full_record() -> CustomerRecord {
        CustomerRecord {
            id: 42,
            name: "Dana White".to_string(),
            email: Some("dana@example.com".to_string()),
            phone: Some("+1-555-0100".to_string()),
            company: Some("Example Inc".to_string()),
            status: Some("active".to_string()),
            last_contact: NaiveDate::from_ymd_opt(2025, 3, 9),
            source: Some("referral".to_string()),
            notes: Some("VIP".to_string()),
        }
    }

    #[test]
    fn test_format_customer_all_fields() {
        let text = format_customer(&full_record());
        assert!(text.starts_with("😊 Sure! Here's what I found:"));
        assert!(text.contains("📌 ID: 42"));
        assert!(text.contains("🙂 Name: Dana White"));
        assert!(text.contains("📧 Email: dana@example.com"));
        assert!(text.contains("📱 Phone: +1-555-0100"));
        assert!(text.contains("🏢 Company: Example Inc"));
        assert!(text.contains("📝 Status: active"));
        assert!(text.contains("🗓️ Last Contact: 2025-03-09"));
        assert!(text.contains("💡 Source: referral"));
        assert!(text.contains("📝 Notes: VIP"));
    }

    #[test]
    fn test_format_customer_missing_fields_render_na() {
        let record = CustomerRecord {
            email: None,
            last_contact: None,
            notes: None,
            ..full_record()
        };
        let text = format_customer(&record);
        assert!(text.contains("📧 Email: N/A"));
        assert!(text.contains("🗓️ Last Contact: N/A"));
        assert!(text.contains("📝 Notes: N/A"));
    }

    #[test]
    fn test_format_field() {
        assert_eq!(
            format_field(CustomerField::Phone, 42, Some("+1-555-0100")),
            "😊 PHONE of customer 42: +1-555-0100"
        );
        assert_eq!(
            format_field(CustomerField::LastContact, 7, None),
            "😊 LAST CONTACT of customer 7: N/A"
        );
    }

    #[test]
    fn test_greeting_priority() {
        assert_eq!(
            greeting_reply("good morning how are you"),
            "☀️ Good morning! How can I help?"
        );
        assert_eq!(
            greeting_reply("how are you"),
            "🤗 I'm just a bot, but I'm doing great! How can I help you?"
        );
        assert_eq!(greeting_reply("thank u"), "🙏 You're welcome! Happy to help.");
        assert_eq!(greeting_reply("hey"), "😊 Hello! How can I assist you today?");
    }

    #[test]
    fn test_miss_replies() {
        assert_eq!(
            customer_not_found(9),
            "❌ Sorry, I couldn't find customer 9."
        );
        assert_eq!(no_next_customer(), "❌ Sorry, no next customer found.");
        assert_eq!(
            name_not_found("zorro"),
            "❌ Sorry, couldn't find customer \"zorro\"."
        );
        assert_eq!(
            field_not_found(CustomerField::Phone),
            "❌ Couldn't find phone."
        );
        assert_eq!(
            last_customer_missing(),
            "❌ Sorry, couldn't find last customer data."
        );
    }

    #[test]
    fn test_delegated_prefix() {
        assert_eq!(delegated("Databases store data."), "😊 Databases store data.");
    }
}
