//! 관리자(`admin`) 페이지
//!
//! 사용자/의사/예약 현황 조회와 의사 등록, 수정, 삭제를 제공합니다.

use actix_session::Session;
use actix_web::{delete, get, post, put, web, HttpResponse};
use tera::Context;
use crate::config::Role;
use crate::core::errors::AppResult;
use crate::domain::dto::{DashboardStats, DoctorForm, DoctorResponse};
use crate::domain::entities::appointments::AppointmentStatus;
use crate::handlers::redirect_on_user_error;
use crate::services::{
    appointments::AppointmentService, doctors::DoctorService, users::UserService,
};
use crate::views::{self, flash};

#[get("")]
pub async fn dashboard(session: Session) -> AppResult<HttpResponse> {
    let user_service = UserService::instance();
    let appointment_service = AppointmentService::instance();

    let stats = DashboardStats {
        users: user_service.count_users().await?,
        clients: user_service.count_by_role(Role::Client).await?,
        doctors: DoctorService::instance().count().await?,
        appointments: appointment_service.count().await?,
        pending_appointments: appointment_service.count_by_status(AppointmentStatus::Pending).await?,
    };

    let mut context = Context::new();
    context.insert("stats", &stats);

    views::render(&session, "admin/dashboard.html", context)
}

#[get("/users")]
pub async fn users(session: Session) -> AppResult<HttpResponse> {
    let users = UserService::instance().list_users().await?;

    let mut context = Context::new();
    context.insert("users", &users);

    views::render(&session, "admin/users.html", context)
}

#[get("/doctors")]
pub async fn doctors(session: Session) -> AppResult<HttpResponse> {
    let doctors = DoctorService::instance().list_doctors().await?;

    let mut context = Context::new();
    context.insert("doctors", &doctors);

    views::render(&session, "admin/doctors.html", context)
}

#[get("/doctors/new")]
pub async fn new_doctor(session: Session) -> AppResult<HttpResponse> {
    views::render(&session, "admin/doctor_form.html", doctor_form_context(None))
}

#[post("/doctors")]
pub async fn create_doctor(session: Session, form: web::Form<DoctorForm>) -> AppResult<HttpResponse> {
    match DoctorService::instance().create_doctor(form.into_inner()).await {
        Ok(doctor) => {
            flash::success(&session, format!("{} was added as a doctor.", doctor.name));
            Ok(views::redirect("/admin/doctors"))
        }
        Err(e) => redirect_on_user_error(&session, e, "/admin/doctors/new"),
    }
}

#[get("/doctors/{id}/edit")]
pub async fn edit_doctor(session: Session, path: web::Path<String>) -> AppResult<HttpResponse> {
    let doctor = DoctorService::instance().get_doctor(&path).await?;

    views::render(
        &session,
        "admin/doctor_form.html",
        doctor_form_context(Some(DoctorResponse::from(doctor))),
    )
}

#[put("/doctors/{id}")]
pub async fn update_doctor(
    session: Session,
    path: web::Path<String>,
    form: web::Form<DoctorForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match DoctorService::instance().update_doctor(&id, form.into_inner()).await {
        Ok(doctor) => {
            flash::success(&session, format!("{}'s details were updated.", doctor.name));
            Ok(views::redirect("/admin/doctors"))
        }
        Err(e) => redirect_on_user_error(&session, e, &format!("/admin/doctors/{}/edit", id)),
    }
}

#[delete("/doctors/{id}")]
pub async fn delete_doctor(session: Session, path: web::Path<String>) -> AppResult<HttpResponse> {
    let doctor = DoctorService::instance().delete_doctor(&path).await?;
    flash::success(&session, format!("{} was removed.", doctor.name));

    Ok(views::redirect("/admin/doctors"))
}

#[get("/appointments")]
pub async fn appointments(session: Session) -> AppResult<HttpResponse> {
    let appointments = AppointmentService::instance().list_all().await?;

    let mut context = Context::new();
    context.insert("appointments", &appointments);

    views::render(&session, "admin/appointments.html", context)
}

/// 새 의사 등록과 수정이 같은 템플릿을 사용합니다.
fn doctor_form_context(doctor: Option<DoctorResponse>) -> Context {
    let mut context = Context::new();

    match doctor {
        Some(doctor) => {
            context.insert("form_action", &format!("/admin/doctors/{}?_method=PUT", doctor.id));
            context.insert("is_new", &false);
            context.insert("doctor", &doctor);
        }
        None => {
            context.insert("form_action", "/admin/doctors");
            context.insert("is_new", &true);
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> DoctorResponse {
        DoctorResponse {
            id: "65f0c0ffee0000000000abcd".to_string(),
            user_id: "65f0c0ffee0000000000dcba".to_string(),
            name: "Dr. Lisa Cuddy".to_string(),
            email: "cuddy@example.com".to_string(),
            specialization: "Endocrinology".to_string(),
            phone: "555-0100".to_string(),
            fee: 200,
            bio: String::new(),
            is_available: true,
        }
    }

    #[test]
    fn test_doctor_form_context_for_new_and_edit() {
        let context = doctor_form_context(None).into_json();
        assert_eq!(context["form_action"], "/admin/doctors");
        assert_eq!(context["is_new"], true);
        assert!(context.get("doctor").is_none());

        let context = doctor_form_context(Some(doctor())).into_json();
        assert_eq!(context["form_action"], "/admin/doctors/65f0c0ffee0000000000abcd?_method=PUT");
        assert_eq!(context["is_new"], false);
        assert_eq!(context["doctor"]["name"], "Dr. Lisa Cuddy");
    }
}
