use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseAssignmentService;
use crate::models::course_assignments::requests::ByTeacherParams;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_teacher_profile};
use crate::storage::Storage;

/// 确定查询目标教师：教师只能查自己，管理员可以查任意教师
async fn resolve_query_teacher(
    storage: &Arc<dyn Storage>,
    user: &User,
    requested: Option<i64>,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Teacher => {
            let profile = resolve_teacher_profile(storage, user).await?;
            if let Some(requested) = requested
                && requested != profile.id
            {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "教师只能查询自己的排课",
                )));
            }
            Ok(profile.id)
        }
        UserRole::Admin => requested.ok_or_else(|| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "管理员查询时必须指明 teacher_id",
            ))
        }),
        UserRole::Student => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查询排课的权限",
        ))),
    }
}

/// 教师任教的 (班级, 科目) 组合
/// GET /course-assignments/by_teacher
pub async fn roster_by_teacher(
    service: &CourseAssignmentService,
    request: &HttpRequest,
    params: ByTeacherParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let teacher_id = match resolve_query_teacher(&storage, &user, params.teacher_id).await {
        Ok(teacher_id) => teacher_id,
        Err(resp) => return Ok(resp),
    };

    match storage.roster_for_teacher(teacher_id).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "查询成功"))),
        Err(e) => {
            error!("Failed to get roster for teacher {}: {}", teacher_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询任教组合失败",
                )),
            )
        }
    }
}

/// 教师名下的学生（经活跃排课到班级再到学生）
/// GET /course-assignments/by_teacher_student
pub async fn students_by_teacher(
    service: &CourseAssignmentService,
    request: &HttpRequest,
    params: ByTeacherParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let teacher_id = match resolve_query_teacher(&storage, &user, params.teacher_id).await {
        Ok(teacher_id) => teacher_id,
        Err(resp) => return Ok(resp),
    };

    match storage.students_for_teacher(teacher_id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(students, "查询成功"))),
        Err(e) => {
            error!("Failed to get students for teacher {}: {}", teacher_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询学生列表失败",
                )),
            )
        }
    }
}
