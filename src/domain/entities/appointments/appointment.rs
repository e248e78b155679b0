//! Appointment Entity
//!
//! 환자(client)가 의사에게 신청한 진료 예약입니다.
//!
//! ## 상태 전이
//!
//! ```text
//! pending ──┬─→ approved ──┬─→ completed
//!           │              └─→ cancelled
//!           ├─→ rejected
//!           └─→ cancelled
//! ```
//!
//! `rejected`, `cancelled`, `completed`는 종료 상태입니다.

use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Approved,
        AppointmentStatus::Rejected,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    /// 같은 시간대를 점유하는 상태
    pub const ACTIVE: [AppointmentStatus; 2] = [AppointmentStatus::Pending, AppointmentStatus::Approved];

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "approved" => Ok(AppointmentStatus::Approved),
            "rejected" => Ok(AppointmentStatus::Rejected),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            _ => Err(format!("Unknown appointment status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Approved, Completed)
                | (Approved, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub client_id: ObjectId,
    pub client_name: String,
    /// 의사 프로필 (`doctors._id`)
    pub doctor_id: ObjectId,
    pub doctor_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    /// `status`가 pending/approved일 때 true. 부분 unique 인덱스 `doctor_active_slot`의 조건입니다.
    #[serde(default)]
    pub active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Appointment {
    /// `pending` 상태의 새 예약
    pub fn new(
        client_id: ObjectId,
        client_name: String,
        doctor_id: ObjectId,
        doctor_name: String,
        date: String,
        time: String,
        reason: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            client_id,
            client_name,
            doctor_id,
            doctor_name,
            date,
            time,
            reason,
            status: AppointmentStatus::Pending,
            active: AppointmentStatus::Pending.is_active(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}
