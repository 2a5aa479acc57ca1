//! Fixture seeder for local development: inserts sample patients, doctors and
//! linked appointments. Standalone binary, connects with DATABASE_URL.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the clinic database with fixture data")]
pub struct Cli {
    #[arg(long, help = "Number of patients to insert", default_value = "10")]
    patients: u32,

    #[arg(long, help = "Number of doctors to insert", default_value = "5")]
    doctors: u32,

    #[arg(long, help = "Number of appointments to insert", default_value = "20")]
    appointments: u32,

    #[arg(long, help = "Database URL override")]
    database_url: Option<String>,
}

const FIRST_NAMES: &[&str] =
    &["Aibek", "Dana", "Olga", "Marat", "Aizhan", "Sergey", "Madina", "Timur", "Elena", "Nurlan"];
const LAST_NAMES: &[&str] =
    &["Akhmetov", "Ivanova", "Petrov", "Suleimenova", "Kim", "Nazarov", "Omarova", "Lee", "Sadykov", "Abenova"];
const SPECIALITIES: &[&str] = &["Therapist", "Surgeon", "Cardiologist", "Dentist", "Neurologist"];

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let database_url = match cli.database_url.clone() {
        Some(url) => url,
        None => std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("failed to connect to database")?;

    let patient_ids = seed_patients(&pool, cli.patients).await?;
    let doctor_ids = seed_doctors(&pool, cli.doctors).await?;
    let appointments = seed_appointments(&pool, &doctor_ids, &patient_ids, cli.appointments).await?;

    println!(
        "seeded {} patients, {} doctors, {} appointments",
        patient_ids.len(),
        doctor_ids.len(),
        appointments
    );
    Ok(())
}

async fn seed_patients(pool: &PgPool, count: u32) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(count as usize);
    for i in 0..count {
        let first = FIRST_NAMES[i as usize % FIRST_NAMES.len()];
        let last = LAST_NAMES[i as usize % LAST_NAMES.len()];
        let phone = format!("+7 777 000 {:04}", i);

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO patients (first_name, last_name, phone) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(first)
        .bind(last)
        .bind(&phone)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn seed_doctors(pool: &PgPool, count: u32) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(count as usize);
    for i in 0..count {
        let first = FIRST_NAMES[(i as usize + 3) % FIRST_NAMES.len()];
        let last = LAST_NAMES[(i as usize + 3) % LAST_NAMES.len()];
        let speciality = SPECIALITIES[i as usize % SPECIALITIES.len()];
        let phone = format!("+7 701 000 {:04}", i);

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO doctors (first_name, last_name, speciality, phone) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(first)
        .bind(last)
        .bind(speciality)
        .bind(&phone)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn seed_appointments(
    pool: &PgPool,
    doctor_ids: &[i64],
    patient_ids: &[i64],
    count: u32,
) -> Result<u32> {
    if doctor_ids.is_empty() || patient_ids.is_empty() {
        return Ok(0);
    }

    let base = Utc::now();
    for i in 0..count {
        let doctor_id = doctor_ids[i as usize % doctor_ids.len()];
        let patient_id = patient_ids[i as usize % patient_ids.len()];
        let date_time = base + Duration::hours(i as i64 + 24);

        sqlx::query(
            "INSERT INTO appointments (date_time, doctor_id, patient_id) VALUES ($1, $2, $3)",
        )
        .bind(date_time)
        .bind(doctor_id)
        .bind(patient_id)
        .execute(pool)
        .await?;
    }
    Ok(count)
}
