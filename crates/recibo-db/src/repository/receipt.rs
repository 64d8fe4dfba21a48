//! # Receipt Repository
//!
//! Database operations for warranty receipts.
//!
//! ## Key Operations
//! - Create with a fresh UUID and timestamp
//! - List newest first
//! - Search by customer, CPF, IMEI or model
//! - Delete by ID
//!
//! ## Search
//! Receipts are few (one per sale in a single shop), so search loads every
//! row and filters in memory with [`WarrantyReceipt::matches`]. A masked or
//! unmasked CPF both match.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use recibo_core::{CompanyProfile, Money, NewWarrantyReceipt, WarrantyReceipt};

const ENTITY: &str = "WarrantyReceipt";

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        customer_name, cpf, phone, city, state,
        product_type, brand, model, rom_memory, ram_memory, imei1, imei2,
        sale_value_cents, sale_value_in_words, warranty_duration,
        issue_city, issue_date, signature_name, observations,
        company_name, company_legal_name, company_cnpj, company_state_registration,
        company_address, company_phone1, company_phone2,
        created_at
    FROM warranty_receipts
"#;

// =============================================================================
// Row Type
// =============================================================================

/// One row of `warranty_receipts`.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ReceiptRow {
    id: String,
    customer_name: String,
    cpf: String,
    phone: String,
    city: String,
    state: String,
    product_type: String,
    brand: String,
    model: String,
    rom_memory: String,
    ram_memory: String,
    imei1: String,
    imei2: Option<String>,
    sale_value_cents: i64,
    sale_value_in_words: String,
    warranty_duration: String,
    issue_city: String,
    issue_date: String,
    signature_name: String,
    observations: Option<String>,
    company_name: String,
    company_legal_name: String,
    company_cnpj: String,
    company_state_registration: String,
    company_address: String,
    company_phone1: String,
    company_phone2: String,
    created_at: DateTime<Utc>,
}

impl From<ReceiptRow> for WarrantyReceipt {
    fn from(row: ReceiptRow) -> Self {
        WarrantyReceipt {
            id: row.id,
            created_at: row.created_at,
            data: NewWarrantyReceipt {
                customer_name: row.customer_name,
                cpf: row.cpf,
                phone: row.phone,
                city: row.city,
                state: row.state,
                product_type: row.product_type,
                brand: row.brand,
                model: row.model,
                rom_memory: row.rom_memory,
                ram_memory: row.ram_memory,
                imei1: row.imei1,
                imei2: row.imei2,
                sale_value: Money::from_cents(row.sale_value_cents),
                sale_value_in_words: row.sale_value_in_words,
                warranty_duration: row.warranty_duration,
                issue_city: row.issue_city,
                issue_date: row.issue_date,
                signature_name: row.signature_name,
                observations: row.observations,
                company: CompanyProfile {
                    name: row.company_name,
                    legal_name: row.company_legal_name,
                    cnpj: row.company_cnpj,
                    state_registration: row.company_state_registration,
                    address: row.company_address,
                    phone1: row.company_phone1,
                    phone2: row.company_phone2,
                },
            },
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for warranty receipt operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.receipts();
///
/// let id = repo.create(&receipt).await?;
/// let newest_first = repo.list_all().await?;
/// repo.delete(&id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Stores a receipt and returns its new ID.
    ///
    /// Text fields are trimmed and blank optional fields stored as NULL
    /// (see [`NewWarrantyReceipt::sanitized`]). The ID is a fresh UUID v4 and
    /// `created_at` is the current time.
    ///
    /// ## Returns
    /// * `Err(DbError::ConstraintViolation)` - negative sale value
    pub async fn create(&self, receipt: &NewWarrantyReceipt) -> DbResult<String> {
        let receipt = receipt.clone().sanitized();
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        debug!(id = %id, customer = %receipt.customer_name, "Inserting receipt");

        sqlx::query(
            r#"
            INSERT INTO warranty_receipts (
                id,
                customer_name, cpf, phone, city, state,
                product_type, brand, model, rom_memory, ram_memory, imei1, imei2,
                sale_value_cents, sale_value_in_words, warranty_duration,
                issue_city, issue_date, signature_name, observations,
                company_name, company_legal_name, company_cnpj, company_state_registration,
                company_address, company_phone1, company_phone2,
                created_at
            ) VALUES (
                ?1,
                ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                ?14, ?15, ?16,
                ?17, ?18, ?19, ?20,
                ?21, ?22, ?23, ?24,
                ?25, ?26, ?27,
                ?28
            )
            "#,
        )
        .bind(&id)
        .bind(&receipt.customer_name)
        .bind(&receipt.cpf)
        .bind(&receipt.phone)
        .bind(&receipt.city)
        .bind(&receipt.state)
        .bind(&receipt.product_type)
        .bind(&receipt.brand)
        .bind(&receipt.model)
        .bind(&receipt.rom_memory)
        .bind(&receipt.ram_memory)
        .bind(&receipt.imei1)
        .bind(&receipt.imei2)
        .bind(receipt.sale_value.cents())
        .bind(&receipt.sale_value_in_words)
        .bind(&receipt.warranty_duration)
        .bind(&receipt.issue_city)
        .bind(&receipt.issue_date)
        .bind(&receipt.signature_name)
        .bind(&receipt.observations)
        .bind(&receipt.company.name)
        .bind(&receipt.company.legal_name)
        .bind(&receipt.company.cnpj)
        .bind(&receipt.company.state_registration)
        .bind(&receipt.company.address)
        .bind(&receipt.company.phone1)
        .bind(&receipt.company.phone2)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        info!(id = %id, "Receipt stored");
        Ok(id)
    }

    /// Every receipt, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<WarrantyReceipt>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC");

        let rows = sqlx::query_as::<_, ReceiptRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed receipts");
        Ok(rows.into_iter().map(WarrantyReceipt::from).collect())
    }

    /// Gets a receipt by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(WarrantyReceipt))` - Receipt found
    /// * `Ok(None)` - No receipt with that ID
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<WarrantyReceipt>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

        let row = sqlx::query_as::<_, ReceiptRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(WarrantyReceipt::from))
    }

    /// Receipts matching `term` on customer name, CPF, IMEI, brand or model,
    /// newest first. A blank term returns everything.
    pub async fn search(&self, term: &str) -> DbResult<Vec<WarrantyReceipt>> {
        debug!(term = %term, "Searching receipts");

        let matches: Vec<_> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|receipt| receipt.matches(term))
            .collect();

        debug!(count = matches.len(), "Search returned receipts");
        Ok(matches)
    }

    /// Number of stored receipts.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM warranty_receipts")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|e| DbError::Internal(e.to_string()))
    }

    /// Deletes a receipt.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No receipt with that ID
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting receipt");

        let result = sqlx::query("DELETE FROM warranty_receipts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        info!(id = %id, "Receipt deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::test_support::sample_receipt;

    async fn repo() -> ReceiptRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .receipts()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repo().await;
        let receipt = sample_receipt("Maria da Silva");

        let id = repo.create(&receipt).await.unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.data, receipt);
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let repo = repo().await;
        let receipt = sample_receipt("Maria da Silva");

        let a = repo.create(&receipt).await.unwrap();
        let b = repo.create(&receipt).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_sanitizes() {
        let repo = repo().await;
        let mut receipt = sample_receipt(" João Souza ");
        receipt.imei2 = Some(String::new());
        receipt.observations = Some("  ".to_string());

        let id = repo.create(&receipt).await.unwrap();
        let stored = repo.get_by_id(&id).await.unwrap().unwrap();

        assert_eq!(stored.data.customer_name, "João Souza");
        assert_eq!(stored.data.imei2, None);
        assert_eq!(stored.data.observations, None);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repo = repo().await;

        for name in ["Primeiro", "Segundo", "Terceiro"] {
            repo.create(&sample_receipt(name)).await.unwrap();
        }

        let names: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.data.customer_name)
            .collect();
        assert_eq!(names, vec!["Terceiro", "Segundo", "Primeiro"]);
    }

    #[tokio::test]
    async fn test_search() {
        let repo = repo().await;

        let mut other = sample_receipt("João Souza");
        other.cpf = "111.444.777-35".to_string();
        other.model = "iPhone 15".to_string();
        other.imei1 = "490154203237518".to_string();

        repo.create(&sample_receipt("Maria da Silva")).await.unwrap();
        repo.create(&other).await.unwrap();

        assert_eq!(repo.search("maria").await.unwrap().len(), 1);
        assert_eq!(repo.search("IPHONE").await.unwrap().len(), 1);
        assert_eq!(repo.search("11144477735").await.unwrap().len(), 1);
        assert_eq!(repo.search("4901542").await.unwrap().len(), 1);
        assert_eq!(repo.search("").await.unwrap().len(), 2);
        assert!(repo.search("motorola").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let id = repo.create(&sample_receipt("Maria da Silva")).await.unwrap();

        repo.delete(&id).await.unwrap();
        assert!(repo.get_by_id(&id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let repo = repo().await;
        let err = repo.delete("does-not-exist").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_negative_sale_value_rejected() {
        let repo = repo().await;
        let mut receipt = sample_receipt("Maria da Silva");
        receipt.sale_value = Money::from_cents(-100);

        let err = repo.create(&receipt).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
