use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::{with_deadline, ListQuery, ModelError};
use crate::filter::{Filters, Metadata};

pub const SORT_SAFELIST: &[&str] = &[
    "id",
    "date_time",
    "doctor_id",
    "patient_id",
    "-id",
    "-date_time",
    "-doctor_id",
    "-patient_id",
];

const COLUMNS: &[&str] = &["id", "created_at", "updated_at", "date_time", "doctor_id", "patient_id"];
const SEARCH_COLUMNS: &[&str] = &["date_time"];

const RETURNING: &str = "id, created_at, updated_at, date_time, doctor_id, patient_id";

/// Holds non-owning references to exactly one doctor and one patient.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub date_time: DateTime<Utc>,
    pub doctor_id: i64,
    pub patient_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewAppointment {
    pub date_time: DateTime<Utc>,
    pub doctor_id: i64,
    pub patient_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentPatch {
    pub date_time: Option<DateTime<Utc>>,
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
}

#[derive(Clone)]
pub struct AppointmentModel {
    pool: PgPool,
}

impl AppointmentModel {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewAppointment) -> Result<Appointment, ModelError> {
        let query = format!(
            "INSERT INTO appointments (date_time, doctor_id, patient_id) \
             VALUES ($1, $2, $3) RETURNING {RETURNING}"
        );
        with_deadline(
            sqlx::query_as::<_, Appointment>(&query)
                .bind(new.date_time)
                .bind(new.doctor_id)
                .bind(new.patient_id)
                .fetch_one(&self.pool),
        )
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Appointment, ModelError> {
        let query = format!("SELECT {RETURNING} FROM appointments WHERE id = $1");
        with_deadline(sqlx::query_as::<_, Appointment>(&query).bind(id).fetch_one(&self.pool)).await
    }

    pub async fn list(&self, filters: &Filters) -> Result<(Vec<Appointment>, Metadata), ModelError> {
        let query = ListQuery::new("appointments", COLUMNS, SEARCH_COLUMNS);

        let total: i64 = with_deadline(
            sqlx::query_scalar(&query.count_sql()).bind(filters.search_pattern()).fetch_one(&self.pool),
        )
        .await?;

        let appointments = with_deadline(
            sqlx::query_as::<_, Appointment>(&query.select_sql(filters)?)
                .bind(filters.search_pattern())
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool),
        )
        .await?;

        Ok((appointments, Metadata::calculate(total, filters.page(), filters.page_size())))
    }

    pub async fn update(&self, id: i64, patch: AppointmentPatch) -> Result<Appointment, ModelError> {
        let mut appointment = self.get(id).await?;
        if let Some(date_time) = patch.date_time {
            appointment.date_time = date_time;
        }
        if let Some(doctor_id) = patch.doctor_id {
            appointment.doctor_id = doctor_id;
        }
        if let Some(patient_id) = patch.patient_id {
            appointment.patient_id = patient_id;
        }

        let query = format!(
            "UPDATE appointments SET date_time = $1, doctor_id = $2, patient_id = $3, \
             updated_at = now() WHERE id = $4 RETURNING {RETURNING}"
        );
        with_deadline(
            sqlx::query_as::<_, Appointment>(&query)
                .bind(appointment.date_time)
                .bind(appointment.doctor_id)
                .bind(appointment.patient_id)
                .bind(id)
                .fetch_one(&self.pool),
        )
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ModelError> {
        let result = with_deadline(
            sqlx::query("DELETE FROM appointments WHERE id = $1").bind(id).execute(&self.pool),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound);
        }
        Ok(())
    }

    /// All appointments for one doctor, soonest first.
    pub async fn by_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, ModelError> {
        let query = format!(
            "SELECT {RETURNING} FROM appointments WHERE doctor_id = $1 ORDER BY date_time, id"
        );
        with_deadline(
            sqlx::query_as::<_, Appointment>(&query).bind(doctor_id).fetch_all(&self.pool),
        )
        .await
    }

    /// All appointments for one patient, soonest first.
    pub async fn by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, ModelError> {
        let query = format!(
            "SELECT {RETURNING} FROM appointments WHERE patient_id = $1 ORDER BY date_time, id"
        );
        with_deadline(
            sqlx::query_as::<_, Appointment>(&query).bind(patient_id).fetch_all(&self.pool),
        )
        .await
    }
}
