use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubmissionService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_student_profile, resolve_teacher_profile};

/// 获取提交详情
/// GET /submissions/{id}
///
/// 学生只能看自己的提交，教师只能看自己考核项下的提交。
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get submission {}: {}", submission_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询提交失败",
                )),
            );
        }
    };

    match user.role {
        UserRole::Admin => {}
        UserRole::Student => {
            let profile = match resolve_student_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            if submission.student_id != profile.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己的提交",
                )));
            }
        }
        UserRole::Teacher => {
            let profile = match resolve_teacher_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            let owns_item = match storage.get_work_item_by_id(submission.item.item_id()).await {
                Ok(Some(item)) => item.teacher_id == profile.id,
                Ok(None) => false,
                Err(e) => {
                    error!(
                        "Failed to get work item {}: {}",
                        submission.item.item_id(),
                        e
                    );
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "查询考核项失败",
                        ),
                    ));
                }
            };
            if !owns_item {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己考核项下的提交",
                )));
            }
        }
    }

    match storage.get_submission_view(submission_id).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok().json(ApiResponse::success(view, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "提交不存在",
        ))),
        Err(e) => {
            error!("Failed to get submission view {}: {}", submission_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询提交失败",
                )),
            )
        }
    }
}
