pub mod appointments;
pub mod doctors;
pub mod params;
pub mod patients;
