pub mod doctor_repo;

pub use doctor_repo::DoctorRepository;
