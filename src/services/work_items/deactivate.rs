use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::WorkItemService;
use super::update::check_owner_permission;
use crate::models::work_items::entities::WorkItemKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

/// 停用考核项（软删除，已有提交不受影响）
/// DELETE /work-items/{kind}/{id}
pub async fn deactivate_work_item(
    service: &WorkItemService,
    request: &HttpRequest,
    kind: WorkItemKind,
    item_id: i64,
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

    match storage.deactivate_work_item(item_id).await {
        Ok(true) => {
            info!("Work item {} deactivated by user {}", item_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("考核项已停用")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "考核项不存在",
        ))),
        Err(e) => {
            error!("Failed to deactivate work item {}: {}", item_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "停用考核项失败",
                )),
            )
        }
    }
}
