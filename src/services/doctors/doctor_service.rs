//! # 의사 프로필 서비스
//!
//! 관리자의 의사 등록/수정/삭제와 환자용 목록 조회를 담당합니다.
//! 의사 프로필은 항상 역할이 `doctor`인 로그인 계정과 한 쌍으로 존재합니다.
//!
//! - 생성: 계정 생성 → 프로필 생성. 프로필 저장에 실패하면 계정을 지웁니다.
//! - 수정: 프로필 갱신 후 계정 이름, 예약에 복사된 의사 이름을 맞춥니다.
//! - 삭제: 프로필 삭제 → 활성 예약 취소 → 계정 삭제

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId};
use singleton_macro::service;
use validator::Validate;
use crate::{
    config::Role,
    core::errors::{AppError, AppResult},
    domain::{
        dto::doctors::{DoctorForm, DoctorResponse},
        entities::doctors::Doctor,
    },
    repositories::{
        appointments::AppointmentRepository,
        doctors::DoctorRepository,
    },
    services::users::UserService,
};

#[service(name = "doctor")]
pub struct DoctorService {
    doctor_repo: Arc<DoctorRepository>,

    appointment_repo: Arc<AppointmentRepository>,

    user_service: Arc<UserService>,
}

impl DoctorService {
    pub async fn list_doctors(&self) -> AppResult<Vec<DoctorResponse>> {
        let doctors = self.doctor_repo.find_all().await?;
        Ok(doctors.into_iter().map(DoctorResponse::from).collect())
    }

    /// 예약 가능한 의사만 (환자용)
    pub async fn list_available(&self) -> AppResult<Vec<DoctorResponse>> {
        let doctors = self.doctor_repo.find_available().await?;
        Ok(doctors.into_iter().map(DoctorResponse::from).collect())
    }

    pub async fn get_doctor(&self, id: &str) -> AppResult<Doctor> {
        self.doctor_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found.".to_string()))
    }

    pub async fn count(&self) -> AppResult<u64> {
        self.doctor_repo.count().await
    }

    /// 의사 계정과 프로필을 함께 만듭니다. 계정의 `username`은 이메일입니다.
    pub async fn create_doctor(&self, form: DoctorForm) -> AppResult<Doctor> {
        form.validate()?;
        form.check_create_fields()?;

        let password = form
            .password
            .clone()
            .ok_or_else(|| AppError::ValidationError("Password is required for a new doctor.".to_string()))?;

        let account = self.user_service
            .create_account(form.email.clone(), form.email.clone(), form.name.clone(), password, Role::Doctor)
            .await?;

        let user_id = account
            .id
            .ok_or_else(|| AppError::InternalError("Created doctor account has no ObjectId".to_string()))?;

        let is_available = form.available();
        let doctor = Doctor::new(
            user_id,
            form.name,
            account.email.clone(),
            form.specialization,
            form.phone,
            form.fee,
            form.bio.unwrap_or_default(),
            is_available,
        );

        match self.doctor_repo.create(doctor).await {
            Ok(created) => {
                log::info!("🩺 의사 등록: {} ({})", created.name, created.email);
                Ok(created)
            }
            Err(e) => {
                log::error!("❌ 의사 프로필 저장 실패, 계정 롤백: {} - {}", account.email, e);
                if let Err(rollback) = self.user_service.delete_user(&user_id.to_hex()).await {
                    log::error!("❌ 의사 계정 롤백 실패: {}", rollback);
                }
                Err(e)
            }
        }
    }

    /// 이메일은 로그인 ID이므로 수정 폼에서 바꿀 수 없습니다.
    pub async fn update_doctor(&self, id: &str, form: DoctorForm) -> AppResult<Doctor> {
        form.validate()?;

        let is_available = form.available();
        let update_doc = doc! {
            "name": &form.name,
            "specialization": &form.specialization,
            "phone": &form.phone,
            "fee": i64::from(form.fee),
            "bio": form.bio.clone().unwrap_or_default(),
            "is_available": is_available,
        };

        let updated = self.doctor_repo
            .update(id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found.".to_string()))?;

        let user_id = updated.user_id.to_hex();
        self.user_service.update_name(&user_id, &updated.name).await?;

        if let Some(password) = form.password {
            self.user_service.change_password(&user_id, password).await?;
            log::info!("🔑 의사 계정 비밀번호 변경: {}", updated.email);
        }

        if let Some(doctor_id) = updated.id {
            self.appointment_repo.rename_doctor(doctor_id, &updated.name).await?;
        }

        log::info!("🩺 의사 정보 수정: {}", updated.name);
        Ok(updated)
    }

    /// 프로필 삭제 후 활성 예약을 취소하고 로그인 계정도 지웁니다.
    pub async fn delete_doctor(&self, id: &str) -> AppResult<Doctor> {
        let deleted = self.doctor_repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found.".to_string()))?;

        let doctor_id: ObjectId = deleted
            .id
            .ok_or_else(|| AppError::InternalError("Deleted doctor has no ObjectId".to_string()))?;

        let cancelled = self.appointment_repo.cancel_active_for_doctor(doctor_id).await?;

        match self.user_service.delete_user(&deleted.user_id.to_hex()).await {
            Ok(()) | Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        log::info!("🗑️ 의사 삭제: {} (취소된 예약 {}건)", deleted.name, cancelled);
        Ok(deleted)
    }
}
