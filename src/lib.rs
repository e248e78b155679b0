//! DocAppoint 예약 서비스
//!
//! 의사 진료 예약을 위한 서버 렌더링 웹 애플리케이션입니다.
//! 세션 기반 로그인(로컬 + Google OAuth), 역할별 라우팅(client/admin/doctor),
//! 플래시 메시지를 사용하는 CRUD 페이지를 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 로컬 회원가입/로그인, Google 계정 연동
//! - **세션 인증**: 7일 유지되는 httpOnly 쿠키 세션
//! - **역할 기반 라우팅**: `/client`, `/admin`, `/doctor` 스코프별 권한 검사
//! - **예약 관리**: 진료 예약 생성, 승인/거절/완료, 취소
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 사용자/의사/예약 데이터 영구 저장
//! - **Redis**: 단건 조회 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /, /client, /admin, /doctor
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← 세션, 역할 검사, _method 오버라이드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 폼 처리, 플래시, 뷰 렌더링
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod views;
pub mod routes;
pub mod handlers;
pub mod middlewares;
