//! 환자(`client`) 페이지
//!
//! `/client` 스코프는 [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가
//! `client` 역할로 보호합니다.

use actix_session::Session;
use actix_web::{delete, get, post, web, HttpResponse};
use tera::Context;
use crate::core::errors::AppResult;
use crate::domain::dto::appointments::{AppointmentForm, NewAppointmentQuery};
use crate::domain::models::auth::SessionUser;
use crate::handlers::redirect_on_user_error;
use crate::services::{appointments::AppointmentService, doctors::DoctorService};
use crate::views::{self, flash};

#[get("")]
pub async fn dashboard(session: Session, user: SessionUser) -> AppResult<HttpResponse> {
    let appointments = AppointmentService::instance().list_for_client(&user).await?;

    let mut context = Context::new();
    context.insert("appointments", &appointments);

    views::render(&session, "client/dashboard.html", context)
}

#[get("/doctors")]
pub async fn doctors(session: Session) -> AppResult<HttpResponse> {
    let doctor_list = DoctorService::instance().list_available().await?;

    let mut context = Context::new();
    context.insert("doctors", &doctor_list);

    views::render(&session, "client/doctors.html", context)
}

#[get("/appointments/new")]
pub async fn new_appointment(session: Session, query: web::Query<NewAppointmentQuery>) -> AppResult<HttpResponse> {
    let doctor_list = DoctorService::instance().list_available().await?;

    let mut context = Context::new();
    context.insert("doctors", &doctor_list);
    context.insert("selected_doctor_id", &query.doctor_id);
    context.insert("today", &chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());

    views::render(&session, "client/new_appointment.html", context)
}

#[post("/appointments")]
pub async fn book_appointment(
    session: Session,
    user: SessionUser,
    form: web::Form<AppointmentForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let back_to = format!("/client/appointments/new?doctor_id={}", urlencoding::encode(&form.doctor_id));

    match AppointmentService::instance().book(&user, form).await {
        Ok(appointment) => {
            flash::success(
                &session,
                format!(
                    "Your appointment with {} on {} at {} was requested.",
                    appointment.doctor_name, appointment.date, appointment.time
                ),
            );
            Ok(views::redirect("/client"))
        }
        Err(e) => redirect_on_user_error(&session, e, &back_to),
    }
}

#[delete("/appointments/{id}")]
pub async fn cancel_appointment(
    session: Session,
    user: SessionUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    match AppointmentService::instance().cancel_by_client(&user, &path).await {
        Ok(_) => {
            flash::success(&session, "Your appointment was cancelled.");
            Ok(views::redirect("/client"))
        }
        Err(e) => redirect_on_user_error(&session, e, "/client"),
    }
}
