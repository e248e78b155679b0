//! 관리자 대시보드 집계

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub users: u64,
    pub clients: u64,
    pub doctors: u64,
    pub appointments: u64,
    pub pending_appointments: u64,
}
