use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubmissionService;
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_student_profile, resolve_teacher_profile};

/// 列出提交
/// GET /submissions
///
/// 学生只看自己的提交，教师只看自己考核项下的提交，管理员不限。
/// pending=true 时只列未评分的提交，按提交时间升序（先交先评）。
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    params: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut query = SubmissionListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        section_id: params.section_id,
        kind: params.kind,
        student_id: params.student_id,
        teacher_id: None,
        pending_only: params.pending.unwrap_or(false),
    };

    match user.role {
        UserRole::Admin => {}
        UserRole::Teacher => {
            let profile = match resolve_teacher_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            query.teacher_id = Some(profile.id);
        }
        UserRole::Student => {
            let profile = match resolve_student_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            query.student_id = Some(profile.id);
        }
    }

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list submissions: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询提交列表失败",
                )),
            )
        }
    }
}
