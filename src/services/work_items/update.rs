use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::WorkItemService;
use crate::models::users::entities::{User, UserRole};
use crate::models::work_items::entities::{WorkItem, WorkItemKind};
use crate::models::work_items::requests::UpdateWorkItemRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_teacher_profile};
use crate::storage::Storage;

/// 权限检查：只有条目所属教师或管理员可以修改
pub(super) async fn check_owner_permission(
    storage: &Arc<dyn Storage>,
    user: &User,
    item: &WorkItem,
) -> Result<(), HttpResponse> {
    match user.role {
        UserRole::Admin => Ok(()),
        UserRole::Teacher => {
            let profile = resolve_teacher_profile(storage, user).await?;
            if item.teacher_id != profile.id {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能操作自己创建的考核项",
                )));
            }
            Ok(())
        }
        UserRole::Student => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有操作考核项的权限",
        ))),
    }
}

/// 更新考核项
/// PATCH /work-items/{kind}/{id}
pub async fn update_work_item(
    service: &WorkItemService,
    request: &HttpRequest,
    kind: WorkItemKind,
    item_id: i64,
    req: UpdateWorkItemRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let item = match storage.get_work_item_by_id(item_id).await {
        Ok(Some(item)) if item.kind() == kind => item,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "考核项不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get work item {}: {}", item_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询考核项失败",
                )),
            );
        }
    };

    if let Err(resp) = check_owner_permission(&storage, &user, &item).await {
        return Ok(resp);
    }

    // kind 不可变，部分更新套用在现有字段上
    let detail = match req.apply_to(&item.detail) {
        Ok(detail) => detail,
        Err(e) => {
            return Ok(HttpResponse::UnprocessableEntity()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    match storage.update_work_item(item_id, req.title.clone(), detail).await {
        Ok(Some(updated)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "考核项更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "考核项不存在",
        ))),
        Err(e) => {
            error!("Failed to update work item {}: {}", item_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "更新考核项失败",
                )),
            )
        }
    }
}
