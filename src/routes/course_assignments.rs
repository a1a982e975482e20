use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::course_assignments::requests::{AssignCourseRequest, ByTeacherParams};
use crate::models::users::entities::UserRole;
use crate::services::CourseAssignmentService;

// 懒加载的全局 CourseAssignmentService 实例
static COURSE_ASSIGNMENT_SERVICE: Lazy<CourseAssignmentService> =
    Lazy::new(CourseAssignmentService::new_lazy);

// 排课
pub async fn assign_course(
    req: HttpRequest,
    body: web::Json<AssignCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_ASSIGNMENT_SERVICE
        .assign_course(&req, body.into_inner())
        .await
}

// 停用排课
pub async fn deactivate_course_assignment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    COURSE_ASSIGNMENT_SERVICE
        .deactivate_course_assignment(&req, path.into_inner())
        .await
}

// 教师任教的班级/科目组合
pub async fn roster_by_teacher(
    req: HttpRequest,
    query: web::Query<ByTeacherParams>,
) -> ActixResult<HttpResponse> {
    COURSE_ASSIGNMENT_SERVICE
        .roster_by_teacher(&req, query.into_inner())
        .await
}

// 教师名下的学生
pub async fn students_by_teacher(
    req: HttpRequest,
    query: web::Query<ByTeacherParams>,
) -> ActixResult<HttpResponse> {
    COURSE_ASSIGNMENT_SERVICE
        .students_by_teacher(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_course_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/course-assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(assign_course))
                    .route("/by_teacher", web::get().to(roster_by_teacher))
                    .route("/by_teacher_student", web::get().to(students_by_teacher))
                    .route("/{id}", web::delete().to(deactivate_course_assignment)),
            ),
    );
}
