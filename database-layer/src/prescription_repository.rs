use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Prescription, PrescriptionChanges, PrescriptionStatus};
use crate::record_id::RecordId;

/// Persistence operations behind the prescription endpoints
#[async_trait]
pub trait PrescriptionStore: Send + Sync {
    async fn insert(&self, prescription: Prescription) -> DatabaseResult<Prescription>;

    async fn delete(&self, id: &RecordId) -> DatabaseResult<Option<Prescription>>;

    async fn update(
        &self,
        id: &RecordId,
        changes: PrescriptionChanges,
    ) -> DatabaseResult<Option<Prescription>>;

    async fn count_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<i64>;

    /// Every prescription, newest first
    async fn list_all(&self) -> DatabaseResult<Vec<Prescription>>;

    async fn find_by_id(&self, id: &RecordId) -> DatabaseResult<Option<Prescription>>;

    /// Prescriptions uploaded to the pharmacy, newest first
    async fn find_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<Vec<Prescription>>;

    async fn set_status(
        &self,
        id: &RecordId,
        status: PrescriptionStatus,
    ) -> DatabaseResult<Option<Prescription>>;

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[derive(Debug, FromRow)]
struct PrescriptionRow {
    id: String,
    pharmacy_id: String,
    user_id: String,
    patient_name: String,
    contact_number: String,
    prescription_image: String,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PrescriptionRow> for Prescription {
    type Error = DatabaseError;

    fn try_from(row: PrescriptionRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<PrescriptionStatus>()
            .map_err(|message| DatabaseError::CorruptRow { table: "prescriptions", message })?;

        Ok(Prescription {
            id: RecordId::parse(&row.id)?,
            pharmacy_id: row.pharmacy_id,
            user_id: row.user_id,
            patient_name: row.patient_name,
            contact_number: row.contact_number,
            prescription_image: row.prescription_image,
            notes: row.notes,
            status,
            created_at: row.created_at,
        })
    }
}

fn into_prescriptions(rows: Vec<PrescriptionRow>) -> DatabaseResult<Vec<Prescription>> {
    rows.into_iter().map(Prescription::try_from).collect()
}

/// PostgreSQL-backed prescription store
#[derive(Debug, Clone)]
pub struct PgPrescriptionRepository {
    db: DatabasePool,
}

impl PgPrescriptionRepository {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

#[async_trait]
impl PrescriptionStore for PgPrescriptionRepository {
    async fn insert(&self, prescription: Prescription) -> DatabaseResult<Prescription> {
        let row = sqlx::query_as::<_, PrescriptionRow>(
            r#"
            INSERT INTO prescriptions (
                id, pharmacy_id, user_id, patient_name, contact_number,
                prescription_image, notes, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(prescription.id.as_str())
        .bind(&prescription.pharmacy_id)
        .bind(&prescription.user_id)
        .bind(&prescription.patient_name)
        .bind(&prescription.contact_number)
        .bind(&prescription.prescription_image)
        .bind(&prescription.notes)
        .bind(prescription.status.as_str())
        .bind(prescription.created_at)
        .fetch_one(self.pool())
        .await?;

        debug!(prescription_id = %prescription.id, "Prescription inserted");
        Prescription::try_from(row)
    }

    async fn delete(&self, id: &RecordId) -> DatabaseResult<Option<Prescription>> {
        let row = sqlx::query_as::<_, PrescriptionRow>(
            "DELETE FROM prescriptions WHERE id = $1 RETURNING *",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(Prescription::try_from).transpose()
    }

    async fn update(
        &self,
        id: &RecordId,
        changes: PrescriptionChanges,
    ) -> DatabaseResult<Option<Prescription>> {
        let row = sqlx::query_as::<_, PrescriptionRow>(
            r#"
            UPDATE prescriptions
            SET
                patient_name = COALESCE($1, patient_name),
                contact_number = COALESCE($2, contact_number),
                prescription_image = COALESCE($3, prescription_image),
                notes = COALESCE($4, notes)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(changes.patient_name)
        .bind(changes.contact_number)
        .bind(changes.prescription_image)
        .bind(changes.notes)
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(Prescription::try_from).transpose()
    }

    async fn count_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM prescriptions WHERE pharmacy_id = $1",
        )
        .bind(pharmacy_id)
        .fetch_one(self.pool())
        .await?;

        Ok(count)
    }

    async fn list_all(&self) -> DatabaseResult<Vec<Prescription>> {
        let rows = sqlx::query_as::<_, PrescriptionRow>(
            "SELECT * FROM prescriptions ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await?;

        into_prescriptions(rows)
    }

    async fn find_by_id(&self, id: &RecordId) -> DatabaseResult<Option<Prescription>> {
        let row = sqlx::query_as::<_, PrescriptionRow>("SELECT * FROM prescriptions WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(self.pool())
            .await?;

        row.map(Prescription::try_from).transpose()
    }

    async fn find_by_pharmacy(&self, pharmacy_id: &str) -> DatabaseResult<Vec<Prescription>> {
        let rows = sqlx::query_as::<_, PrescriptionRow>(
            r#"
            SELECT * FROM prescriptions
            WHERE pharmacy_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(pharmacy_id)
        .fetch_all(self.pool())
        .await?;

        into_prescriptions(rows)
    }

    async fn set_status(
        &self,
        id: &RecordId,
        status: PrescriptionStatus,
    ) -> DatabaseResult<Option<Prescription>> {
        let row = sqlx::query_as::<_, PrescriptionRow>(
            "UPDATE prescriptions SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await?;

        debug!(prescription_id = %id, status = %status, "Prescription status changed");
        row.map(Prescription::try_from).transpose()
    }

    async fn is_healthy(&self) -> bool {
        self.db.is_healthy().await
    }
}
