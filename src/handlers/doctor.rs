//! 의사(`doctor`) 페이지

use actix_session::Session;
use actix_web::{get, put, web, HttpResponse};
use tera::Context;
use crate::core::errors::AppResult;
use crate::domain::dto::{DoctorResponse, StatusForm};
use crate::domain::models::auth::SessionUser;
use crate::handlers::redirect_on_user_error;
use crate::services::appointments::AppointmentService;
use crate::views::{self, flash};

#[get("")]
pub async fn dashboard(session: Session, user: SessionUser) -> AppResult<HttpResponse> {
    let (doctor, appointments) = AppointmentService::instance().list_for_doctor_user(&user).await?;

    let mut context = Context::new();
    context.insert("doctor", &DoctorResponse::from(doctor));
    context.insert("appointments", &appointments);

    views::render(&session, "doctor/dashboard.html", context)
}

#[put("/appointments/{id}")]
pub async fn update_appointment_status(
    session: Session,
    user: SessionUser,
    path: web::Path<String>,
    form: web::Form<StatusForm>,
) -> AppResult<HttpResponse> {
    let next = form.into_inner().status;

    match AppointmentService::instance().change_status_by_doctor(&user, &path, next).await {
        Ok(appointment) => {
            flash::success(
                &session,
                format!("The appointment with {} is now {}.", appointment.client_name, appointment.status),
            );
            Ok(views::redirect("/doctor"))
        }
        Err(e) => redirect_on_user_error(&session, e, "/doctor"),
    }
}
