use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::errors::EduSystemError;
use crate::models::submissions::requests::EvaluateSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_teacher_profile};

/// 评分
/// PATCH /submissions/{id}/evaluate
///
/// 只有考核项所属的教师可以评分；重复评分允许覆盖。
/// 得分不得为负，且不得超过测验/考试的评分上限（作业无上限）。
pub async fn evaluate_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: EvaluateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 评分人必须是教师角色，管理员也不例外
    if user.role != UserRole::Teacher {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有教师可以评分",
        )));
    }
    let profile = match resolve_teacher_profile(&storage, &user).await {
        Ok(profile) => profile,
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

    let item = match storage.get_work_item_by_id(submission.item.item_id()).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "提交指向的考核项不存在",
            )));
        }
        Err(e) => {
            error!(
                "Failed to get work item {}: {}",
                submission.item.item_id(),
                e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询考核项失败",
                )),
            );
        }
    };

    if item.teacher_id != profile.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能评阅自己考核项下的提交",
        )));
    }

    if req.obtained_marks < 0 {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::InvalidScore,
            format!("得分不能为负数: {}", req.obtained_marks),
        )));
    }

    if let Some(ceiling) = item.detail.grading_ceiling()
        && req.obtained_marks > ceiling
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ScoreExceedsCeiling,
            format!("得分 {} 超出评分上限 {}", req.obtained_marks, ceiling),
        )));
    }

    // 存储层在事务内复核上限，并发改动上限时以复核结果为准
    match storage
        .evaluate_submission(submission_id, req.obtained_marks)
        .await
    {
        Ok(Some(submission)) => {
            info!(
                "Submission {} evaluated with {} marks by teacher {}",
                submission_id, req.obtained_marks, profile.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "评分成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "提交不存在",
        ))),
        Err(EduSystemError::Validation(msg)) => Ok(HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::ScoreExceedsCeiling, msg),
        )),
        Err(e) => {
            error!("Failed to evaluate submission {}: {}", submission_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "写入评分失败",
                )),
            )
        }
    }
}
