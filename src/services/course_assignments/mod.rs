pub mod assign;
pub mod by_teacher;
pub mod deactivate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::course_assignments::requests::{AssignCourseRequest, ByTeacherParams};
use crate::storage::Storage;

pub struct CourseAssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseAssignmentService {
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

    /// 排课
    pub async fn assign_course(
        &self,
        request: &HttpRequest,
        req: AssignCourseRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_course(self, request, req).await
    }

    /// 停用排课
    pub async fn deactivate_course_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        deactivate::deactivate_course_assignment(self, request, assignment_id).await
    }

    /// 教师任教的班级/科目组合
    pub async fn roster_by_teacher(
        &self,
        request: &HttpRequest,
        query: ByTeacherParams,
    ) -> ActixResult<HttpResponse> {
        by_teacher::roster_by_teacher(self, request, query).await
    }

    /// 教师名下的学生
    pub async fn students_by_teacher(
        &self,
        request: &HttpRequest,
        query: ByTeacherParams,
    ) -> ActixResult<HttpResponse> {
        by_teacher::students_by_teacher(self, request, query).await
    }
}
