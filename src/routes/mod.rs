//! 라우트 설정
//!
//! | 경로 | 보호 | 핸들러 |
//! |------|------|--------|
//! | `/`, `/register`, `/login`, `/logout` | - | [`handlers::users`] |
//! | `/auth/google`, `/auth/google/callback` | - | [`handlers::auth`] |
//! | `/client/**` | `client` 역할 | [`handlers::client`] |
//! | `/admin/**` | `admin` 역할 | [`handlers::admin`] |
//! | `/doctor/**` | `doctor` 역할 | [`handlers::doctor`] |

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::config::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // 추출 실패 → 400 에러 페이지
    handlers::configure_extractors(cfg);

    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_auth_routes(cfg);
    configure_client_routes(cfg);
    configure_admin_routes(cfg);
    configure_doctor_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::users::home)
        .service(handlers::users::register_form)
        .service(handlers::users::register)
        .service(handlers::users::login_form)
        .service(handlers::users::login)
        .service(handlers::users::logout);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::google_login)
        .service(handlers::auth::google_callback);
}

fn configure_client_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/client")
            .wrap(AuthMiddleware::required_with_role(Role::Client))
            .service(handlers::client::dashboard)
            .service(handlers::client::doctors)
            .service(handlers::client::new_appointment)
            .service(handlers::client::book_appointment)
            .service(handlers::client::cancel_appointment)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::required_with_role(Role::Admin))
            .service(handlers::admin::dashboard)
            .service(handlers::admin::users)
            .service(handlers::admin::doctors)
            .service(handlers::admin::new_doctor)
            .service(handlers::admin::create_doctor)
            .service(handlers::admin::edit_doctor)
            .service(handlers::admin::update_doctor)
            .service(handlers::admin::delete_doctor)
            .service(handlers::admin::appointments)
    );
}

fn configure_doctor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/doctor")
            .wrap(AuthMiddleware::required_with_role(Role::Doctor))
            .service(handlers::doctor::dashboard)
            .service(handlers::doctor::update_appointment_status)
    );
}

/// 라우트 그룹 목록 (시작 로그용)
pub const ROUTE_GROUPS: &[(&str, &str)] = &[
    ("/", "home, register, login, logout, Google OAuth"),
    ("/client", "client dashboard, doctors, appointments"),
    ("/admin", "admin dashboard, users, doctors, appointments"),
    ("/doctor", "doctor dashboard, appointment status"),
];

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "docappoint",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
