//! 예약 목록 화면용 응답 DTO

use serde::Serialize;
use crate::domain::entities::appointments::{Appointment, AppointmentStatus};

/// 템플릿에 전달되는 예약 정보
///
/// `can_*` 값은 현재 상태에서 허용되는 전이를 그대로 반영하며,
/// 템플릿은 이 값으로 버튼 표시 여부를 결정합니다.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub client_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub can_cancel: bool,
    pub can_approve: bool,
    pub can_reject: bool,
    pub can_complete: bool,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        let status = appointment.status;

        Self {
            id: appointment.id.map(|id| id.to_hex()).unwrap_or_default(),
            client_name: appointment.client_name,
            doctor_id: appointment.doctor_id.to_hex(),
            doctor_name: appointment.doctor_name,
            date: appointment.date,
            time: appointment.time,
            reason: appointment.reason,
            status,
            can_cancel: status.can_transition_to(AppointmentStatus::Cancelled),
            can_approve: status.can_transition_to(AppointmentStatus::Approved),
            can_reject: status.can_transition_to(AppointmentStatus::Rejected),
            can_complete: status.can_transition_to(AppointmentStatus::Completed),
        }
    }
}
