//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 User / Doctor / Appointment
//! ├── dto       - HTML 폼 요청, 템플릿용 응답
//! └── models    - 세션 사용자, 플래시 메시지, Google OAuth 응답
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```
//!
//! ## 역할별 데이터 흐름
//!
//! | 역할 | 읽기 | 쓰기 |
//! |------|------|------|
//! | client | 진료 가능한 의사, 본인 예약 | 예약 신청, 예약 취소 |
//! | doctor | 본인에게 배정된 예약 | 예약 승인/거절/완료 |
//! | admin | 전체 사용자, 의사, 예약 | 의사 계정 + 프로필 생성/수정/삭제 |

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::{Appointment, AppointmentStatus, Doctor, User};
pub use dto::*;
pub use models::*;
