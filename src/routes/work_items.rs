use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::work_items::entities::WorkItemKind;
use crate::models::work_items::requests::{
    CreateWorkItemRequest, UpcomingParams, UpdateWorkItemRequest, WorkItemListParams,
};
use crate::services::WorkItemService;

// 懒加载的全局 WorkItemService 实例
static WORK_ITEM_SERVICE: Lazy<WorkItemService> = Lazy::new(WorkItemService::new_lazy);

// 列出考核项
pub async fn list_work_items(
    req: HttpRequest,
    path: web::Path<WorkItemKind>,
    query: web::Query<WorkItemListParams>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE
        .list_work_items(&req, path.into_inner(), query.into_inner())
        .await
}

// 创建考核项
pub async fn create_work_item(
    req: HttpRequest,
    path: web::Path<WorkItemKind>,
    body: web::Json<CreateWorkItemRequest>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE
        .create_work_item(&req, path.into_inner(), body.into_inner())
        .await
}

// 列出未来的考核项
pub async fn list_upcoming_work_items(
    req: HttpRequest,
    path: web::Path<WorkItemKind>,
    query: web::Query<UpcomingParams>,
) -> ActixResult<HttpResponse> {
    WORK_ITEM_SERVICE
        .list_upcoming_work_items(&req, path.into_inner(), query.into_inner())
        .await
}

// 获取考核项详情
pub async fn get_work_item(
    req: HttpRequest,
    path: web::Path<(WorkItemKind, i64)>,
) -> ActixResult<HttpResponse> {
    let (kind, item_id) = path.into_inner();
    WORK_ITEM_SERVICE.get_work_item(&req, kind, item_id).await
}

// 更新考核项
pub async fn update_work_item(
    req: HttpRequest,
    path: web::Path<(WorkItemKind, i64)>,
    body: web::Json<UpdateWorkItemRequest>,
) -> ActixResult<HttpResponse> {
    let (kind, item_id) = path.into_inner();
    WORK_ITEM_SERVICE
        .update_work_item(&req, kind, item_id, body.into_inner())
        .await
}

// 停用考核项
pub async fn deactivate_work_item(
    req: HttpRequest,
    path: web::Path<(WorkItemKind, i64)>,
) -> ActixResult<HttpResponse> {
    let (kind, item_id) = path.into_inner();
    WORK_ITEM_SERVICE
        .deactivate_work_item(&req, kind, item_id)
        .await
}

// 配置路由（kind 作为路径段，非法类型在路径解析阶段被拒绝）
pub fn configure_work_items_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/work-items/{kind}")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_work_items))
            .route("", web::post().to(create_work_item))
            .route("/upcoming", web::get().to(list_upcoming_work_items))
            .route("/{id}", web::get().to(get_work_item))
            .route("/{id}", web::patch().to(update_work_item))
            .route("/{id}", web::delete().to(deactivate_work_item)),
    );
}
