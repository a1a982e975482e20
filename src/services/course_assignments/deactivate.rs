use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseAssignmentService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_teacher_profile};

/// 停用排课（幂等，停用后同一三元组可重新排课）
/// DELETE /course-assignments/{id}
pub async fn deactivate_course_assignment(
    service: &CourseAssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let assignment = match storage.get_course_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "排课记录不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get course assignment {}: {}", assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询排课失败",
                )),
            );
        }
    };

    // 权限检查：只有排课中的教师本人或管理员可以停用
    match user.role {
        UserRole::Admin => {}
        UserRole::Teacher => {
            let profile = match resolve_teacher_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            if assignment.teacher_id != profile.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能停用自己的排课",
                )));
            }
        }
        UserRole::Student => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "没有停用排课的权限",
            )));
        }
    }

    match storage.deactivate_course_assignment(assignment_id).await {
        Ok(true) => {
            info!(
                "Course assignment {} deactivated by user {}",
                assignment_id, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("排课已停用")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "排课记录不存在",
        ))),
        Err(e) => {
            error!("Failed to deactivate course assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "停用排课失败",
                )),
            )
        }
    }
}
