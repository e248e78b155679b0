//! # 진료 예약 서비스
//!
//! ## 예약 규칙
//!
//! - 지난 날짜로는 예약할 수 없습니다.
//! - `is_available`이 꺼진 의사는 예약할 수 없습니다.
//! - 같은 의사의 같은 날짜/시간에 활성(pending/approved) 예약이 있으면 409
//!   (날짜/시간은 `YYYY-MM-DD`/`HH:MM`으로 정규화해 저장하며, 동시 신청은 unique 인덱스가 막습니다)
//! - 환자는 자신의 예약만 취소, 의사는 자신에게 배정된 예약만 처리할 수 있습니다.
//!
//! ## 상태 전이
//!
//! ```text
//! pending ──▶ approved ──▶ completed
//!    │           │
//!    ├──▶ rejected
//!    └──────────┴──▶ cancelled
//! ```

use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use singleton_macro::service;
use validator::Validate;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::appointments::{AppointmentForm, AppointmentResponse},
        entities::{
            appointments::{Appointment, AppointmentStatus},
            doctors::Doctor,
        },
        models::auth::SessionUser,
    },
    repositories::{
        appointments::{AppointmentRepository, SLOT_TAKEN_MESSAGE},
        doctors::DoctorRepository,
        parse_object_id,
    },
    utils::string_utils::{parse_date, parse_time},
};

#[service(name = "appointment")]
pub struct AppointmentService {
    appointment_repo: Arc<AppointmentRepository>,

    doctor_repo: Arc<DoctorRepository>,
}

impl AppointmentService {
    /// 환자의 예약 신청. 새 예약은 `pending` 상태입니다.
    pub async fn book(&self, client: &SessionUser, form: AppointmentForm) -> AppResult<Appointment> {
        form.validate()?;

        let date = parse_date(&form.date)
            .ok_or_else(|| AppError::ValidationError("Please choose a valid date.".to_string()))?;
        let time = parse_time(&form.time)
            .ok_or_else(|| AppError::ValidationError("Please choose a valid time.".to_string()))?;
        ensure_not_in_past(date, chrono::Local::now().date_naive())?;
        let (slot_date, slot_time) = slot_key(date, time);

        let doctor = self.doctor_repo
            .find_by_id(&form.doctor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found.".to_string()))?;

        if !doctor.is_available {
            return Err(AppError::ValidationError(
                "That doctor is not accepting appointments right now.".to_string(),
            ));
        }

        let doctor_id = doctor
            .id
            .ok_or_else(|| AppError::InternalError("Stored doctor has no ObjectId".to_string()))?;

        let booked = self.appointment_repo.find_active_slot(doctor_id, &slot_date, &slot_time).await?;
        ensure_slot_free(booked.as_ref())?;

        let client_id = parse_object_id(&client.id, "User")?;
        let appointment = Appointment::new(
            client_id,
            client.name.clone(),
            doctor_id,
            doctor.name,
            slot_date,
            slot_time,
            form.reason,
        );

        let created = self.appointment_repo.create(appointment).await?;
        log::info!(
            "📅 예약 신청: {} → {} ({} {})",
            created.client_name, created.doctor_name, created.date, created.time
        );

        Ok(created)
    }

    /// 환자 본인의 예약 취소
    pub async fn cancel_by_client(&self, client: &SessionUser, appointment_id: &str) -> AppResult<Appointment> {
        let appointment = self.get_appointment(appointment_id).await?;

        if appointment.client_id.to_hex() != client.id {
            log::warn!("🚫 다른 사용자의 예약 취소 시도: {} → {}", client.email, appointment_id);
            return Err(AppError::AuthorizationError(
                "You can only cancel your own appointments.".to_string(),
            ));
        }

        self.transition(appointment, AppointmentStatus::Cancelled).await
    }

    /// 의사의 승인/거절/완료 처리
    pub async fn change_status_by_doctor(
        &self,
        doctor_user: &SessionUser,
        appointment_id: &str,
        next: AppointmentStatus,
    ) -> AppResult<Appointment> {
        if !matches!(
            next,
            AppointmentStatus::Approved | AppointmentStatus::Rejected | AppointmentStatus::Completed
        ) {
            return Err(AppError::ValidationError(
                "Doctors may only approve, reject or complete appointments.".to_string(),
            ));
        }

        let doctor = self.doctor_for_user(doctor_user).await?;
        let appointment = self.get_appointment(appointment_id).await?;

        if Some(appointment.doctor_id) != doctor.id {
            log::warn!("🚫 배정되지 않은 예약 처리 시도: {} → {}", doctor_user.email, appointment_id);
            return Err(AppError::AuthorizationError(
                "You can only manage appointments assigned to you.".to_string(),
            ));
        }

        self.transition(appointment, next).await
    }

    async fn get_appointment(&self, id: &str) -> AppResult<Appointment> {
        self.appointment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found.".to_string()))
    }

    async fn doctor_for_user(&self, user: &SessionUser) -> AppResult<Doctor> {
        let user_id = parse_object_id(&user.id, "Doctor profile")?;

        self.doctor_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No doctor profile is linked to your account.".to_string()))
    }

    /// 현재 상태를 조건으로 갱신하므로 동시에 처리된 요청은 409가 됩니다.
    async fn transition(&self, appointment: Appointment, next: AppointmentStatus) -> AppResult<Appointment> {
        check_transition(appointment.status, next)?;

        let id = appointment
            .id
            .ok_or_else(|| AppError::InternalError("Stored appointment has no ObjectId".to_string()))?;

        let updated = self.appointment_repo
            .update_status(id, appointment.status, next)
            .await?
            .ok_or_else(|| AppError::ConflictError(
                "This appointment was just updated. Please refresh and try again.".to_string(),
            ))?;

        log::info!("📋 예약 상태 변경: {} {} → {}", id.to_hex(), appointment.status, next);
        Ok(updated)
    }

    pub async fn list_for_client(&self, client: &SessionUser) -> AppResult<Vec<AppointmentResponse>> {
        let client_id = parse_object_id(&client.id, "User")?;
        let appointments = self.appointment_repo.find_by_client(client_id).await?;

        Ok(appointments.into_iter().map(AppointmentResponse::from).collect())
    }

    /// 로그인한 의사의 프로필과 배정된 예약 목록
    pub async fn list_for_doctor_user(&self, doctor_user: &SessionUser) -> AppResult<(Doctor, Vec<AppointmentResponse>)> {
        let doctor = self.doctor_for_user(doctor_user).await?;
        let doctor_id = doctor
            .id
            .ok_or_else(|| AppError::InternalError("Stored doctor has no ObjectId".to_string()))?;

        let appointments = self.appointment_repo.find_by_doctor(doctor_id).await?;
        Ok((doctor, appointments.into_iter().map(AppointmentResponse::from).collect()))
    }

    pub async fn list_all(&self) -> AppResult<Vec<AppointmentResponse>> {
        let appointments = self.appointment_repo.find_all().await?;
        Ok(appointments.into_iter().map(AppointmentResponse::from).collect())
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.appointment_repo.count().await
    }

    pub async fn count_by_status(&self, status: AppointmentStatus) -> AppResult<u64> {
        self.appointment_repo.count_by_status(status).await
    }
}

fn ensure_not_in_past(date: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if date < today {
        return Err(AppError::ValidationError(
            "You cannot book an appointment in the past.".to_string(),
        ));
    }
    Ok(())
}

/// 저장/비교에 쓰는 정규화된 날짜와 시간 (`2031-5-4` → `2031-05-04`)
fn slot_key(date: NaiveDate, time: NaiveTime) -> (String, String) {
    (date.format("%Y-%m-%d").to_string(), time.format("%H:%M").to_string())
}

fn ensure_slot_free(booked: Option<&Appointment>) -> AppResult<()> {
    match booked {
        Some(_) => Err(AppError::ConflictError(SLOT_TAKEN_MESSAGE.to_string())),
        None => Ok(()),
    }
}

fn check_transition(current: AppointmentStatus, next: AppointmentStatus) -> AppResult<()> {
    if !current.can_transition_to(next) {
        return Err(AppError::ValidationError(format!(
            "A {} appointment cannot be marked as {}.",
            current, next
        )));
    }
    Ok(())
}
