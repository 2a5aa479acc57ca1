use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::{with_deadline, ListQuery, ModelError};
use crate::filter::{Filters, Metadata};

pub const SORT_SAFELIST: &[&str] =
    &["id", "first_name", "last_name", "-id", "-first_name", "-last_name"];

const COLUMNS: &[&str] = &["id", "created_at", "updated_at", "first_name", "last_name", "phone"];
const SEARCH_COLUMNS: &[&str] = &["first_name", "last_name"];

const RETURNING: &str = "id, created_at, updated_at, first_name, last_name, phone";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Patient {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

/// Partial patch: absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone)]
pub struct PatientModel {
    pool: PgPool,
}

impl PatientModel {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewPatient) -> Result<Patient, ModelError> {
        let query = format!(
            "INSERT INTO patients (first_name, last_name, phone) VALUES ($1, $2, $3) \
             RETURNING {RETURNING}"
        );
        with_deadline(
            sqlx::query_as::<_, Patient>(&query)
                .bind(&new.first_name)
                .bind(&new.last_name)
                .bind(&new.phone)
                .fetch_one(&self.pool),
        )
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Patient, ModelError> {
        let query = format!("SELECT {RETURNING} FROM patients WHERE id = $1");
        with_deadline(sqlx::query_as::<_, Patient>(&query).bind(id).fetch_one(&self.pool)).await
    }

    pub async fn list(&self, filters: &Filters) -> Result<(Vec<Patient>, Metadata), ModelError> {
        let query = ListQuery::new("patients", COLUMNS, SEARCH_COLUMNS);

        let total: i64 = with_deadline(
            sqlx::query_scalar(&query.count_sql()).bind(filters.search_pattern()).fetch_one(&self.pool),
        )
        .await?;

        let patients = with_deadline(
            sqlx::query_as::<_, Patient>(&query.select_sql(filters)?)
                .bind(filters.search_pattern())
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool),
        )
        .await?;

        Ok((patients, Metadata::calculate(total, filters.page(), filters.page_size())))
    }

    pub async fn update(&self, id: i64, patch: PatientPatch) -> Result<Patient, ModelError> {
        let mut patient = self.get(id).await?;
        if let Some(first_name) = patch.first_name {
            patient.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            patient.last_name = last_name;
        }
        if let Some(phone) = patch.phone {
            patient.phone = phone;
        }

        let query = format!(
            "UPDATE patients SET first_name = $1, last_name = $2, phone = $3, \
             updated_at = now() WHERE id = $4 RETURNING {RETURNING}"
        );
        with_deadline(
            sqlx::query_as::<_, Patient>(&query)
                .bind(&patient.first_name)
                .bind(&patient.last_name)
                .bind(&patient.phone)
                .bind(id)
                .fetch_one(&self.pool),
        )
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ModelError> {
        let result =
            with_deadline(sqlx::query("DELETE FROM patients WHERE id = $1").bind(id).execute(&self.pool))
                .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound);
        }
        Ok(())
    }
}
