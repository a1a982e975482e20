use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::WorkItemService;
use crate::models::users::entities::UserRole;
use crate::models::work_items::entities::WorkItemKind;
use crate::models::work_items::requests::CreateWorkItemRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_teacher_profile};

/// 创建考核项
/// POST /work-items/{kind}
pub async fn create_work_item(
    service: &WorkItemService,
    request: &HttpRequest,
    kind: WorkItemKind,
    req: CreateWorkItemRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 只有教师可以创建考核项；条目归属其教师档案
    if user.role != UserRole::Teacher {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有教师可以创建考核项",
        )));
    }
    let profile = match resolve_teacher_profile(&storage, &user).await {
        Ok(profile) => profile,
        Err(resp) => return Ok(resp),
    };

    // 校验类型特有字段（截止/考试时间须在未来，评分上限须为正）
    let detail = match req.into_detail(kind, chrono::Utc::now()) {
        Ok(detail) => detail,
        Err(e) => {
            let code = e.error_code();
            return Ok(match code {
                ErrorCode::BadRequest => {
                    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, e.message()))
                }
                _ => HttpResponse::UnprocessableEntity()
                    .json(ApiResponse::error_empty(code, e.message())),
            });
        }
    };

    // 教师只能在自己任教的科目（及班级）下布置
    match storage
        .has_active_course_assignment(profile.id, req.subject_id, req.section_id)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只能在自己任教的科目和班级下创建考核项",
            )));
        }
        Err(e) => {
            error!("Failed to check course assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询排课失败",
                )),
            );
        }
    }

    match storage
        .create_work_item(profile.id, &req.title, req.subject_id, req.section_id, detail)
        .await
    {
        Ok(item) => {
            info!(
                "Work item {} ({}) created by teacher {}",
                item.id,
                item.kind(),
                profile.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(item, "考核项创建成功")))
        }
        Err(e) => {
            error!("Failed to create work item: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "创建考核项失败",
                )),
            )
        }
    }
}
