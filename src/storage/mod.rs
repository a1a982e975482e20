use std::sync::Arc;

use crate::models::{
    course_assignments::{
        entities::CourseAssignment,
        responses::{CourseAssignmentView, RosterEntry, TaughtStudent},
    },
    directory::{Section, Subject},
    submissions::{
        entities::{ItemRef, Submission},
        requests::SubmissionListQuery,
        responses::{SubmissionListResponse, SubmissionView},
    },
    users::{StudentProfile, TeacherProfile, User},
    work_items::{
        entities::{WorkItem, WorkItemDetail, WorkItemKind},
        requests::WorkItemListQuery,
        responses::{WorkItemListResponse, WorkItemView},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 身份目录（外部协作方，只读）
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户ID获取教师档案
    async fn get_teacher_profile_by_user_id(&self, user_id: i64)
    -> Result<Option<TeacherProfile>>;
    // 通过档案ID获取教师档案
    async fn get_teacher_profile_by_id(&self, id: i64) -> Result<Option<TeacherProfile>>;
    // 通过用户ID获取学生档案
    async fn get_student_profile_by_user_id(&self, user_id: i64)
    -> Result<Option<StudentProfile>>;
    // 通过档案ID获取学生档案
    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>>;

    /// 参考目录（外部协作方，只读）
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_section_by_id(&self, id: i64) -> Result<Option<Section>>;

    /// 考核项管理方法
    // 创建考核项
    async fn create_work_item(
        &self,
        teacher_id: i64,
        title: &str,
        subject_id: i64,
        section_id: Option<i64>,
        detail: WorkItemDetail,
    ) -> Result<WorkItem>;
    // 通过ID获取考核项（不过滤活跃状态，调用方自行判断）
    async fn get_work_item_by_id(&self, id: i64) -> Result<Option<WorkItem>>;
    // 获取考核项视图（联表补齐科目/教师/班级信息）
    async fn get_work_item_view(&self, id: i64) -> Result<Option<WorkItemView>>;
    // 更新考核项
    async fn update_work_item(
        &self,
        id: i64,
        title: Option<String>,
        detail: WorkItemDetail,
    ) -> Result<Option<WorkItem>>;
    // 停用考核项（幂等）
    async fn deactivate_work_item(&self, id: i64) -> Result<bool>;
    // 列出考核项
    async fn list_work_items_with_pagination(
        &self,
        query: WorkItemListQuery,
    ) -> Result<WorkItemListResponse>;
    // 列出指定类型未来的考核项，按截止/考试时间升序
    async fn list_upcoming_work_items(
        &self,
        kind: WorkItemKind,
        section_id: Option<i64>,
    ) -> Result<Vec<WorkItemView>>;

    /// 提交管理方法
    // 创建提交（(student, item) 唯一性由存储层唯一索引裁决）
    async fn create_submission(
        &self,
        student_id: i64,
        item: ItemRef,
        file_url: Option<String>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取提交视图（联表补齐学生/考核项/科目信息与派生字段）
    async fn get_submission_view(&self, id: i64) -> Result<Option<SubmissionView>>;
    // 评分（事务内复核评分上限后落库，重复评分允许覆盖）
    async fn evaluate_submission(&self, id: i64, obtained_marks: i32)
    -> Result<Option<Submission>>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;

    /// 排课管理方法
    // 排课（活跃三元组唯一性由存储层唯一约束裁决）
    async fn assign_course(
        &self,
        subject_id: i64,
        teacher_id: i64,
        section_id: i64,
    ) -> Result<CourseAssignment>;
    // 通过ID获取排课记录
    async fn get_course_assignment_by_id(&self, id: i64) -> Result<Option<CourseAssignment>>;
    // 获取排课视图
    async fn get_course_assignment_view(&self, id: i64) -> Result<Option<CourseAssignmentView>>;
    // 停用排课（幂等）
    async fn deactivate_course_assignment(&self, id: i64) -> Result<bool>;
    // 教师是否在某科目（及班级）有活跃排课
    async fn has_active_course_assignment(
        &self,
        teacher_id: i64,
        subject_id: i64,
        section_id: Option<i64>,
    ) -> Result<bool>;
    // 教师任教的 (班级, 科目) 组合（去重）
    async fn roster_for_teacher(&self, teacher_id: i64) -> Result<Vec<RosterEntry>>;
    // 教师名下的学生（经活跃排课到班级再到学生，去重）
    async fn students_for_teacher(&self, teacher_id: i64) -> Result<Vec<TaughtStudent>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
