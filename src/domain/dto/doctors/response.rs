use serde::Serialize;
use crate::domain::entities::doctors::Doctor;

/// 의사 목록/수정 폼 화면용
#[derive(Debug, Clone, Serialize)]
pub struct DoctorResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub phone: String,
    pub fee: u32,
    pub bio: String,
    pub is_available: bool,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: doctor.user_id.to_hex(),
            name: doctor.name,
            email: doctor.email,
            specialization: doctor.specialization,
            phone: doctor.phone,
            fee: doctor.fee,
            bio: doctor.bio,
            is_available: doctor.is_available,
        }
    }
}
