pub mod appointment;
pub mod doctor;
pub mod patient;

pub use appointment::AppointmentModel;
pub use doctor::DoctorModel;
pub use patient::PatientModel;

use sqlx::PgPool;

/// One facade per record kind, all sharing the pool opened at startup.
#[derive(Clone)]
pub struct Models {
    pub patients: PatientModel,
    pub doctors: DoctorModel,
    pub appointments: AppointmentModel,
}

impl Models {
    pub fn new(pool: PgPool) -> Self {
        Self {
            patients: PatientModel::new(pool.clone()),
            doctors: DoctorModel::new(pool.clone()),
            appointments: AppointmentModel::new(pool),
        }
    }
}
