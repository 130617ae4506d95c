//! Customer records and the repository the chat router reads from.

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::info;

use helpdesk_core::error::HelpdeskError;

use crate::db::Database;

/// A single CRM customer row.
///
/// `id` is unique and ordered; "next customer" pagination relies on that
/// ordering. Every field except `name` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub last_contact: Option<NaiveDate>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

/// The customer columns a field lookup can address.
///
/// The variant order mirrors the column order in the schema; the synonym
/// table in the chat crate maps user keywords onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Company,
    Status,
    LastContact,
    Source,
    Notes,
}

impl CustomerField {
    /// The SQL column name for this field.
    pub fn column(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
            CustomerField::Company => "company",
            CustomerField::Status => "status",
            CustomerField::LastContact => "last_contact",
            CustomerField::Source => "source",
            CustomerField::Notes => "notes",
        }
    }

    /// Human-facing label: column name with underscores spaced out, upper-cased.
    pub fn display_name(&self) -> String {
        self.column().replace('_', " ").to_uppercase()
    }
}

const RECORD_COLUMNS: &str =
    "id, name, email, phone, company, status, last_contact, source, notes";

/// Read-side repository over the crm_records table.
///
/// Cheap to clone; all clones share the same underlying connection.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: Arc<Database>,
}

impl CustomerRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Fetch a customer by exact id.
    pub fn find_by_id(&self, id: i64) -> Result<Option<CustomerRecord>, HelpdeskError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM crm_records WHERE id = ?1", RECORD_COLUMNS),
                [id],
                map_record,
            )
            .optional()
            .map_err(|e| HelpdeskError::Storage(format!("Failed to fetch customer {}: {}", id, e)))
        })
    }

    /// Fetch the customer with the smallest id strictly greater than `id`.
    pub fn find_next_after(&self, id: i64) -> Result<Option<CustomerRecord>, HelpdeskError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM crm_records WHERE id > ?1 ORDER BY id ASC LIMIT 1",
                    RECORD_COLUMNS
                ),
                [id],
                map_record,
            )
            .optional()
            .map_err(|e| {
                HelpdeskError::Storage(format!("Failed to fetch customer after {}: {}", id, e))
            })
        })
    }

    /// Case-insensitive substring match on the name column; first row by id.
    pub fn find_by_name_contains(
        &self,
        fragment: &str,
    ) -> Result<Option<CustomerRecord>, HelpdeskError> {
        let pattern = format!("%{}%", fragment);
        self.db.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM crm_records WHERE name LIKE ?1 ORDER BY id ASC LIMIT 1",
                    RECORD_COLUMNS
                ),
                [pattern.as_str()],
                map_record,
            )
            .optional()
            .map_err(|e| {
                HelpdeskError::Storage(format!("Failed to search customers by name: {}", e))
            })
        })
    }

    /// Fetch a single column for a customer.
    ///
    /// The outer `Option` is whether the row exists; the inner one is whether
    /// the column holds a value.
    pub fn find_field_by_id(
        &self,
        id: i64,
        field: CustomerField,
    ) -> Result<Option<Option<String>>, HelpdeskError> {
        // The column name comes from the CustomerField enum, never from user
        // input, so string interpolation here cannot inject.
        let sql = format!("SELECT {} FROM crm_records WHERE id = ?1", field.column());
        self.db.with_conn(|conn| {
            conn.query_row(&sql, [id], |row| row.get::<_, Option<String>>(0))
                .optional()
                .map_err(|e| {
                    HelpdeskError::Storage(format!(
                        "Failed to fetch {} for customer {}: {}",
                        field.column(),
                        id,
                        e
                    ))
                })
        })
    }

    /// Total number of customer rows.
    pub fn count(&self) -> Result<u64, HelpdeskError> {
        self.db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM crm_records", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n as u64)
            .map_err(|e| HelpdeskError::Storage(format!("Failed to count customers: {}", e)))
        })
    }

    /// Insert or replace a customer row.
    pub fn insert(&self, record: &CustomerRecord) -> Result<(), HelpdeskError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO crm_records
                 (id, name, email, phone, company, status, last_contact, source, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    record.id,
                    record.name,
                    record.email,
                    record.phone,
                    record.company,
                    record.status,
                    record.last_contact.map(|d| d.format("%Y-%m-%d").to_string()),
                    record.source,
                    record.notes,
                ],
            )
            .map_err(|e| {
                HelpdeskError::Storage(format!("Failed to insert customer {}: {}", record.id, e))
            })?;
            Ok(())
        })
    }

    /// Seed a handful of demo customers for local evaluation.
    ///
    /// Idempotent: existing rows with the same ids are replaced.
    pub fn seed_demo_data(&self) -> Result<(), HelpdeskError> {
        let demo = [
            CustomerRecord {
                id: 1,
                name: "Alice Johnson".to_string(),
                email: Some("alice@acme.io".to_string()),
                phone: Some("+1-202-555-0134".to_string()),
                company: Some("Acme Corp".to_string()),
                status: Some("active".to_string()),
                last_contact: NaiveDate::from_ymd_opt(2025, 6, 12),
                source: Some("referral".to_string()),
                notes: Some("Prefers email contact".to_string()),
            },
            CustomerRecord {
                id: 2,
                name: "Bob Stone".to_string(),
                email: Some("bob@globex.com".to_string()),
                phone: None,
                company: Some("Globex".to_string()),
                status: Some("lead".to_string()),
                last_contact: NaiveDate::from_ymd_opt(2025, 7, 2),
                source: Some("webinar".to_string()),
                notes: None,
            },
            CustomerRecord {
                id: 3,
                name: "Carol Mendes".to_string(),
                email: None,
                phone: Some("+44 20 7946 0958".to_string()),
                company: Some("Initech".to_string()),
                status: Some("churned".to_string()),
                last_contact: None,
                source: Some("cold call".to_string()),
                notes: Some("Asked not to be contacted until Q4".to_string()),
            },
        ];

        for record in &demo {
            self.insert(record)?;
        }
        info!(count = demo.len(), "Demo customer data seeded");
        Ok(())
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<CustomerRecord> {
    let last_contact: Option<String> = row.get(6)?;
    Ok(CustomerRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        company: row.get(4)?,
        status: row.get(5)?,
        last_contact: last_contact
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        source: row.get(7)?,
        notes: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_repo() -> CustomerRepository {
        CustomerRepository::new(Arc::new(Database::in_memory().unwrap()))
    }

    fn record(id: i64, name: &str) -> CustomerRecord {
        CustomerRecord {
            id,
            name: name.to_string(),
            email: Some(format!("user{}@example.com", id)),
            phone: Some("555-0100".to_string()),
            company: Some("Example Inc".to_string()),
            status: Some("active".to_string()),
            last_contact: NaiveDate::from_ymd_opt(2025, 1, 15),
            source: Some("referral".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_insert_and_find_by_id() {
        let repo = make_repo();
        repo.insert(&record(42, "Dana White")).unwrap();

        let found = repo.find_by_id(42).unwrap().unwrap();
        assert_eq!(found.name, "Dana White");
        assert_eq!(found.email.as_deref(), Some("user42@example.com"));
        assert_eq!(
            found.last_contact,
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
    }

    #[test]
    fn test_find_by_id_missing() {
        let repo = make_repo();
        assert!(repo.find_by_id(999).unwrap().is_none());
    }

    #[test]
    fn test_find_next_after_skips_gaps() {
        let repo = make_repo();
        repo.insert(&record(1, "First")).unwrap();
        repo.insert(&record(5, "Fifth")).unwrap();
        repo.insert(&record(9, "Ninth")).unwrap();

        let next = repo.find_next_after(1).unwrap().unwrap();
        assert_eq!(next.id, 5);

        let next = repo.find_next_after(5).unwrap().unwrap();
        assert_eq!(next.id, 9);
    }

    #[test]
    fn test_find_next_after_end_of_table() {
        let repo = make_repo();
        repo.insert(&record(7, "Last")).unwrap();
        assert!(repo.find_next_after(7).unwrap().is_none());
    }

    #[test]
    fn test_find_by_name_substring_case_insensitive() {
        let repo = make_repo();
        repo.insert(&record(10, "Alice Johnson")).unwrap();

        // Lowercased user input should still match the stored capitalization.
        let found = repo.find_by_name_contains("alice").unwrap().unwrap();
        assert_eq!(found.id, 10);

        let found = repo.find_by_name_contains("johns").unwrap().unwrap();
        assert_eq!(found.id, 10);
    }

    #[test]
    fn test_find_by_name_first_match_by_id() {
        let repo = make_repo();
        repo.insert(&record(20, "Sam Alvarez")).unwrap();
        repo.insert(&record(15, "Samantha Reed")).unwrap();

        let found = repo.find_by_name_contains("sam").unwrap().unwrap();
        assert_eq!(found.id, 15);
    }

    #[test]
    fn test_find_field_present() {
        let repo = make_repo();
        repo.insert(&record(3, "Carol")).unwrap();

        let value = repo.find_field_by_id(3, CustomerField::Phone).unwrap();
        assert_eq!(value, Some(Some("555-0100".to_string())));
    }

    #[test]
    fn test_find_field_null_column() {
        let repo = make_repo();
        repo.insert(&record(3, "Carol")).unwrap();

        // notes is None in the fixture.
        let value = repo.find_field_by_id(3, CustomerField::Notes).unwrap();
        assert_eq!(value, Some(None));
    }

    #[test]
    fn test_find_field_missing_row() {
        let repo = make_repo();
        let value = repo.find_field_by_id(404, CustomerField::Email).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_count() {
        let repo = make_repo();
        assert_eq!(repo.count().unwrap(), 0);
        repo.insert(&record(1, "A")).unwrap();
        repo.insert(&record(2, "B")).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_seed_demo_data_idempotent() {
        let repo = make_repo();
        repo.seed_demo_data().unwrap();
        let count = repo.count().unwrap();
        repo.seed_demo_data().unwrap();
        assert_eq!(repo.count().unwrap(), count);
    }

    #[test]
    fn test_field_display_names() {
        assert_eq!(CustomerField::Phone.display_name(), "PHONE");
        assert_eq!(CustomerField::LastContact.display_name(), "LAST CONTACT");
    }

    #[test]
    fn test_last_contact_unparseable_treated_as_missing() {
        let repo = make_repo();
        repo.insert(&record(8, "Erin")).unwrap();
        // Corrupt the stored date directly.
        repo.db
            .with_conn(|conn| {
                conn.execute(
                    "UPDATE crm_records SET last_contact = 'soon' WHERE id = 8",
                    [],
                )
                .map_err(|e| HelpdeskError::Storage(e.to_string()))?;
                Ok(())
            })
            .unwrap();

        let found = repo.find_by_id(8).unwrap().unwrap();
        assert!(found.last_contact.is_none());
    }
}
