use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::models::work_items::entities::WorkItemDetail;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_student_profile};

/// 创建提交
/// POST /submissions
///
/// 校验顺序：请求形状 -> kind 一致性 -> 条目存在且活跃 -> 截止时间 -> 重复提交。
pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 三可空 id 收敛为考核项引用（恰好一个、kind 一致）
    let item_ref = match req.item_ref() {
        Ok(item_ref) => item_ref,
        Err(e) => {
            return Ok(HttpResponse::UnprocessableEntity()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    // 确定提交人：学生只能以本人身份提交，教师/管理员代交时必须指明学生
    let student_id = match user.role {
        UserRole::Student => {
            let profile = match resolve_student_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            if let Some(requested) = req.student_id
                && requested != profile.id
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "学生只能以本人身份提交",
                )));
            }
            profile.id
        }
        UserRole::Teacher | UserRole::Admin => {
            let Some(student_id) = req.student_id else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "代交时必须指明 student_id",
                )));
            };
            match storage.get_student_profile_by_id(student_id).await {
                Ok(Some(_)) => student_id,
                Ok(None) => {
                    return Ok(HttpResponse::UnprocessableEntity().json(
                        ApiResponse::error_empty(
                            ErrorCode::StudentProfileNotFound,
                            "指定的学生档案不存在",
                        ),
                    ));
                }
                Err(e) => {
                    error!("Failed to get student profile {}: {}", student_id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "查询学生档案失败",
                        ),
                    ));
                }
            }
        }
    };

    // 条目必须存在、活跃，且数据库里记录的 kind 与引用一致
    let item = match storage.get_work_item_by_id(item_ref.item_id()).await {
        Ok(Some(item)) if item.is_active && item.kind() == item_ref.kind() => item,
        Ok(_) => {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::ItemNotFound,
                format!("{} {} 不存在", item_ref.kind(), item_ref.item_id()),
            )));
        }
        Err(e) => {
            error!("Failed to get work item {}: {}", item_ref.item_id(), e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询考核项失败",
                )),
            );
        }
    };

    // 作业过了截止时间不再受理；恰好在截止时刻提交算有效
    if let WorkItemDetail::Assignment { due_date, .. } = item.detail
        && chrono::Utc::now() > due_date
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::DeadlinePassed,
            format!("作业已于 {due_date} 截止"),
        )));
    }

    match storage
        .create_submission(student_id, item_ref, req.file_url.clone())
        .await
    {
        Ok(submission) => {
            info!(
                "Submission {} created for student {} on {} {}",
                submission.id,
                student_id,
                item_ref.kind(),
                item_ref.item_id()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) if e.is_unique_violation() => {
            Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::DuplicateSubmission,
                "该学生已提交过此考核项",
            )))
        }
        Err(e) => {
            error!("Failed to create submission: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建提交失败",
                )),
            )
        }
    }
}
