use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::WorkItemService;
use crate::models::users::entities::UserRole;
use crate::models::work_items::entities::WorkItemKind;
use crate::models::work_items::requests::{UpcomingParams, WorkItemListParams, WorkItemListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_student_profile, resolve_teacher_profile};

/// 列出考核项
/// GET /work-items/{kind}
///
/// 可见范围按角色收敛：学生只看本班级，教师只看自己布置的，管理员不限。
pub async fn list_work_items(
    service: &WorkItemService,
    request: &HttpRequest,
    kind: WorkItemKind,
    params: WorkItemListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let mut query = WorkItemListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        kind: Some(kind),
        section_id: params.section_id,
        subject_id: params.subject_id,
        teacher_id: None,
        search: params.search,
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
            query.section_id = Some(profile.section_id);
        }
    }

    match storage.list_work_items_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list work items: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询考核项列表失败",
                )),
            )
        }
    }
}

/// 列出未来的考核项（作业未截止 / 考试未开始），按时间升序
/// GET /work-items/{kind}/upcoming
pub async fn list_upcoming_work_items(
    service: &WorkItemService,
    request: &HttpRequest,
    kind: WorkItemKind,
    params: UpcomingParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 学生固定看本班级，其他角色按参数过滤
    let section_id = match user.role {
        UserRole::Student => {
            let profile = match resolve_student_profile(&storage, &user).await {
                Ok(profile) => profile,
                Err(resp) => return Ok(resp),
            };
            Some(profile.section_id)
        }
        _ => params.section_id,
    };

    match storage.list_upcoming_work_items(kind, section_id).await {
        Ok(views) => Ok(HttpResponse::Ok().json(ApiResponse::success(views, "查询成功"))),
        Err(e) => {
            error!("Failed to list upcoming work items: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询未来考核项失败",
                )),
            )
        }
    }
}
