use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::WorkItemService;
use crate::models::work_items::entities::WorkItemKind;
use crate::models::{ApiResponse, ErrorCode};

/// 获取考核项详情
/// GET /work-items/{kind}/{id}
///
/// 路径类型与条目实际类型不符时按不存在处理。
pub async fn get_work_item(
    service: &WorkItemService,
    request: &HttpRequest,
    kind: WorkItemKind,
    item_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_work_item_view(item_id).await {
        Ok(Some(view)) if view.kind == kind => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(view, "查询成功")))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "考核项不存在",
        ))),
        Err(e) => {
            error!("Failed to get work item {}: {}", item_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询考核项失败",
                )),
            )
        }
    }
}
