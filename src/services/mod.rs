pub mod course_assignments;
pub mod submissions;
pub mod work_items;

pub use course_assignments::CourseAssignmentService;
pub use submissions::SubmissionService;
pub use work_items::WorkItemService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::users::entities::{StudentProfile, TeacherProfile, User};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 解析调用者的教师档案
///
/// 返回 Err 时已经是可直接返回的错误响应。
pub(crate) async fn resolve_teacher_profile(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<TeacherProfile, HttpResponse> {
    match storage.get_teacher_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::TeacherProfileNotFound,
                "当前用户没有教师档案",
            )),
        ),
        Err(e) => {
            error!("Failed to resolve teacher profile for user {}: {}", user.id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询教师档案失败",
                )),
            )
        }
    }
}

/// 解析调用者的学生档案
pub(crate) async fn resolve_student_profile(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<StudentProfile, HttpResponse> {
    match storage.get_student_profile_by_user_id(user.id).await {
        Ok(Some(profile)) => Ok(profile),
        Ok(None) => Err(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::StudentProfileNotFound,
                "当前用户没有学生档案",
            )),
        ),
        Err(e) => {
            error!("Failed to resolve student profile for user {}: {}", user.id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "查询学生档案失败",
                )),
            )
        }
    }
}

/// 从请求扩展中取出当前用户（RequireJWT 已写入）
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{EduSystemError, Result};
    use crate::models::course_assignments::{
        entities::CourseAssignment,
        responses::{CourseAssignmentView, RosterEntry, TaughtStudent},
    };
    use crate::models::directory::{Section, Subject};
    use crate::models::submissions::{
        entities::{ItemRef, Submission},
        requests::SubmissionListQuery,
        responses::{SubmissionListResponse, SubmissionView},
    };
    use crate::models::users::entities::UserRole;
    use crate::models::work_items::{
        entities::{WorkItem, WorkItemDetail, WorkItemKind},
        requests::WorkItemListQuery,
        responses::{WorkItemListResponse, WorkItemView},
    };
    use actix_web::http::StatusCode;
    use async_trait::async_trait;
    use chrono::Utc;

    /// 所有查询都以驱动报错收场的存储
    struct FailingStorage;

    fn unavailable<T>() -> Result<T> {
        Err(EduSystemError::database_operation(
            "connection refused to 10.0.0.1",
        ))
    }

    #[async_trait]
    impl Storage for FailingStorage {
        async fn get_user_by_id(&self, _id: i64) -> Result<Option<User>> {
            unavailable()
        }
        async fn get_teacher_profile_by_user_id(
            &self,
            _user_id: i64,
        ) -> Result<Option<TeacherProfile>> {
            unavailable()
        }
        async fn get_teacher_profile_by_id(&self, _id: i64) -> Result<Option<TeacherProfile>> {
            unavailable()
        }
        async fn get_student_profile_by_user_id(
            &self,
            _user_id: i64,
        ) -> Result<Option<StudentProfile>> {
            unavailable()
        }
        async fn get_student_profile_by_id(&self, _id: i64) -> Result<Option<StudentProfile>> {
            unavailable()
        }
        async fn get_subject_by_id(&self, _id: i64) -> Result<Option<Subject>> {
            unavailable()
        }
        async fn get_section_by_id(&self, _id: i64) -> Result<Option<Section>> {
            unavailable()
        }
        async fn create_work_item(
            &self,
            _teacher_id: i64,
            _title: &str,
            _subject_id: i64,
            _section_id: Option<i64>,
            _detail: WorkItemDetail,
        ) -> Result<WorkItem> {
            unavailable()
        }
        async fn get_work_item_by_id(&self, _id: i64) -> Result<Option<WorkItem>> {
            unavailable()
        }
        async fn get_work_item_view(&self, _id: i64) -> Result<Option<WorkItemView>> {
            unavailable()
        }
        async fn update_work_item(
            &self,
            _id: i64,
            _title: Option<String>,
            _detail: WorkItemDetail,
        ) -> Result<Option<WorkItem>> {
            unavailable()
        }
        async fn deactivate_work_item(&self, _id: i64) -> Result<bool> {
            unavailable()
        }
        async fn list_work_items_with_pagination(
            &self,
            _query: WorkItemListQuery,
        ) -> Result<WorkItemListResponse> {
            unavailable()
        }
        async fn list_upcoming_work_items(
            &self,
            _kind: WorkItemKind,
            _section_id: Option<i64>,
        ) -> Result<Vec<WorkItemView>> {
            unavailable()
        }
        async fn create_submission(
            &self,
            _student_id: i64,
            _item: ItemRef,
            _file_url: Option<String>,
        ) -> Result<Submission> {
            unavailable()
        }
        async fn get_submission_by_id(&self, _id: i64) -> Result<Option<Submission>> {
            unavailable()
        }
        async fn get_submission_view(&self, _id: i64) -> Result<Option<SubmissionView>> {
            unavailable()
        }
        async fn evaluate_submission(
            &self,
            _id: i64,
            _obtained_marks: i32,
        ) -> Result<Option<Submission>> {
            unavailable()
        }
        async fn list_submissions_with_pagination(
            &self,
            _query: SubmissionListQuery,
        ) -> Result<SubmissionListResponse> {
            unavailable()
        }
        async fn assign_course(
            &self,
            _subject_id: i64,
            _teacher_id: i64,
            _section_id: i64,
        ) -> Result<CourseAssignment> {
            unavailable()
        }
        async fn get_course_assignment_by_id(&self, _id: i64) -> Result<Option<CourseAssignment>> {
            unavailable()
        }
        async fn get_course_assignment_view(
            &self,
            _id: i64,
        ) -> Result<Option<CourseAssignmentView>> {
            unavailable()
        }
        async fn deactivate_course_assignment(&self, _id: i64) -> Result<bool> {
            unavailable()
        }
        async fn has_active_course_assignment(
            &self,
            _teacher_id: i64,
            _subject_id: i64,
            _section_id: Option<i64>,
        ) -> Result<bool> {
            unavailable()
        }
        async fn roster_for_teacher(&self, _teacher_id: i64) -> Result<Vec<RosterEntry>> {
            unavailable()
        }
        async fn students_for_teacher(&self, _teacher_id: i64) -> Result<Vec<TaughtStudent>> {
            unavailable()
        }
    }

    fn sample_user(role: UserRole) -> User {
        User {
            id: 1,
            username: "teacher_zhang".to_string(),
            email: "zhang@example.com".to_string(),
            role,
            is_active: true,
            is_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn body_string(resp: HttpResponse) -> String {
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_teacher_resolve_failure_hides_driver_error() {
        let storage: Arc<dyn Storage> = Arc::new(FailingStorage);
        let user = sample_user(UserRole::Teacher);

        let resp = resolve_teacher_profile(&storage, &user).await.unwrap_err();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // 响应体只有统一文案，驱动报错留在日志里
        let body = body_string(resp).await;
        assert!(body.contains("查询教师档案失败"));
        assert!(!body.contains("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_student_resolve_failure_hides_driver_error() {
        let storage: Arc<dyn Storage> = Arc::new(FailingStorage);
        let user = sample_user(UserRole::Student);

        let resp = resolve_student_profile(&storage, &user).await.unwrap_err();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(resp).await;
        assert!(body.contains("查询学生档案失败"));
        assert!(!body.contains("10.0.0.1"));
    }
}
