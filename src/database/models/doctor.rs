use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::{with_deadline, ListQuery, ModelError};
use crate::filter::{Filters, Metadata};

pub const SORT_SAFELIST: &[&str] = &[
    "id",
    "first_name",
    "last_name",
    "speciality",
    "-id",
    "-first_name",
    "-last_name",
    "-speciality",
];

const COLUMNS: &[&str] =
    &["id", "created_at", "updated_at", "first_name", "last_name", "speciality", "phone"];
const SEARCH_COLUMNS: &[&str] = &["first_name", "last_name", "speciality"];

const RETURNING: &str = "id, created_at, updated_at, first_name, last_name, speciality, phone";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Doctor {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub speciality: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub speciality: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DoctorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub speciality: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone)]
pub struct DoctorModel {
    pool: PgPool,
}

impl DoctorModel {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewDoctor) -> Result<Doctor, ModelError> {
        let query = format!(
            "INSERT INTO doctors (first_name, last_name, speciality, phone) \
             VALUES ($1, $2, $3, $4) RETURNING {RETURNING}"
        );
        with_deadline(
            sqlx::query_as::<_, Doctor>(&query)
                .bind(&new.first_name)
                .bind(&new.last_name)
                .bind(&new.speciality)
                .bind(&new.phone)
                .fetch_one(&self.pool),
        )
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Doctor, ModelError> {
        let query = format!("SELECT {RETURNING} FROM doctors WHERE id = $1");
        with_deadline(sqlx::query_as::<_, Doctor>(&query).bind(id).fetch_one(&self.pool)).await
    }

    pub async fn list(&self, filters: &Filters) -> Result<(Vec<Doctor>, Metadata), ModelError> {
        let query = ListQuery::new("doctors", COLUMNS, SEARCH_COLUMNS);

        let total: i64 = with_deadline(
            sqlx::query_scalar(&query.count_sql()).bind(filters.search_pattern()).fetch_one(&self.pool),
        )
        .await?;

        let doctors = with_deadline(
            sqlx::query_as::<_, Doctor>(&query.select_sql(filters)?)
                .bind(filters.search_pattern())
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool),
        )
        .await?;

        Ok((doctors, Metadata::calculate(total, filters.page(), filters.page_size())))
    }

    pub async fn update(&self, id: i64, patch: DoctorPatch) -> Result<Doctor, ModelError> {
        let mut doctor = self.get(id).await?;
        if let Some(first_name) = patch.first_name {
            doctor.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            doctor.last_name = last_name;
        }
        if let Some(speciality) = patch.speciality {
            doctor.speciality = speciality;
        }
        if let Some(phone) = patch.phone {
            doctor.phone = phone;
        }

        let query = format!(
            "UPDATE doctors SET first_name = $1, last_name = $2, speciality = $3, phone = $4, \
             updated_at = now() WHERE id = $5 RETURNING {RETURNING}"
        );
        with_deadline(
            sqlx::query_as::<_, Doctor>(&query)
                .bind(&doctor.first_name)
                .bind(&doctor.last_name)
                .bind(&doctor.speciality)
                .bind(&doctor.phone)
                .bind(id)
                .fetch_one(&self.pool),
        )
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ModelError> {
        let result =
            with_deadline(sqlx::query("DELETE FROM doctors WHERE id = $1").bind(id).execute(&self.pool))
                .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound);
        }
        Ok(())
    }
}
