pub mod create;
pub mod deactivate;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::work_items::entities::WorkItemKind;
use crate::models::work_items::requests::{
    CreateWorkItemRequest, UpcomingParams, UpdateWorkItemRequest, WorkItemListParams,
};
use crate::storage::Storage;

pub struct WorkItemService {
    storage: Option<Arc<dyn Storage>>,
}

impl WorkItemService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建考核项
    pub async fn create_work_item(
        &self,
        request: &HttpRequest,
        kind: WorkItemKind,
        req: CreateWorkItemRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_work_item(self, request, kind, req).await
    }

    /// 获取考核项详情
    pub async fn get_work_item(
        &self,
        request: &HttpRequest,
        kind: WorkItemKind,
        item_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_work_item(self, request, kind, item_id).await
    }

    /// 更新考核项
    pub async fn update_work_item(
        &self,
        request: &HttpRequest,
        kind: WorkItemKind,
        item_id: i64,
        req: UpdateWorkItemRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_work_item(self, request, kind, item_id, req).await
    }

    /// 停用考核项
    pub async fn deactivate_work_item(
        &self,
        request: &HttpRequest,
        kind: WorkItemKind,
        item_id: i64,
    ) -> ActixResult<HttpResponse> {
        deactivate::deactivate_work_item(self, request, kind, item_id).await
    }

    /// 列出考核项
    pub async fn list_work_items(
        &self,
        request: &HttpRequest,
        kind: WorkItemKind,
        query: WorkItemListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_work_items(self, request, kind, query).await
    }

    /// 列出未来的考核项
    pub async fn list_upcoming_work_items(
        &self,
        request: &HttpRequest,
        kind: WorkItemKind,
        query: UpcomingParams,
    ) -> ActixResult<HttpResponse> {
        list::list_upcoming_work_items(self, request, kind, query).await
    }
}
