use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseAssignmentService;
use crate::models::course_assignments::requests::AssignCourseRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, resolve_teacher_profile};
use crate::storage::Storage;

/// 确定排课的教师：教师只能给自己排课，管理员可以替他人排
async fn resolve_assignment_teacher(
    storage: &Arc<dyn Storage>,
    user: &User,
    requested: Option<i64>,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Teacher => {
            let profile = resolve_teacher_profile(storage, user).await?;
            if let Some(requested) = requested
                && requested != profile.id
            {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "教师只能给自己排课",
                )));
            }
            Ok(profile.id)
        }
        UserRole::Admin => {
            let Some(teacher_id) = requested else {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "管理员排课时必须指明 teacher_id",
                )));
            };
            match storage.get_teacher_profile_by_id(teacher_id).await {
                Ok(Some(_)) => Ok(teacher_id),
                Ok(None) => Err(HttpResponse::UnprocessableEntity().json(
                    ApiResponse::error_empty(
                        ErrorCode::TeacherProfileNotFound,
                        "指定的教师档案不存在",
                    ),
                )),
                Err(e) => {
                    error!("Failed to get teacher profile {}: {}", teacher_id, e);
                    Err(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "查询教师档案失败",
                        )),
                    )
                }
            }
        }
        UserRole::Student => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有排课的权限",
        ))),
    }
}

/// 排课
/// POST /course-assignments
///
/// 同一 (科目, 教师, 班级) 三元组最多一条活跃排课；
/// 停用后可以重新排课。
pub async fn assign_course(
    service: &CourseAssignmentService,
    request: &HttpRequest,
    req: AssignCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let teacher_id = match resolve_assignment_teacher(&storage, &user, req.teacher_id).await {
        Ok(teacher_id) => teacher_id,
        Err(resp) => return Ok(resp),
    };

    // 科目与班级必须在参考目录中存在
    match storage.get_subject_by_id(req.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "指定的科目不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get subject {}: {}", req.subject_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询科目失败",
                )),
            );
        }
    }
    match storage.get_section_by_id(req.section_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::SectionNotFound,
                "指定的班级不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get section {}: {}", req.section_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询班级失败",
                )),
            );
        }
    }

    match storage
        .assign_course(req.subject_id, teacher_id, req.section_id)
        .await
    {
        Ok(assignment) => {
            info!(
                "Course assignment {} created: subject {} / teacher {} / section {}",
                assignment.id, req.subject_id, teacher_id, req.section_id
            );
            // 返回联表补齐后的视图
            match storage.get_course_assignment_view(assignment.id).await {
                Ok(Some(view)) => {
                    Ok(HttpResponse::Created().json(ApiResponse::success(view, "排课成功")))
                }
                _ => Ok(
                    HttpResponse::Created().json(ApiResponse::success(assignment, "排课成功"))
                ),
            }
        }
        Err(e) if e.is_unique_violation() => {
            Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::DuplicateAssignment,
                "该科目/教师/班级组合已有活跃排课",
            )))
        }
        Err(e) => {
            error!("Failed to assign course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "排课失败",
                )),
            )
        }
    }
}
