use serde::Deserialize;
use ts_rs::TS;

/// 排课请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course_assignment.ts")]
pub struct AssignCourseRequest {
    pub subject_id: i64,
    /// 不填时默认为调用者本人（教师）；管理员可以替他人排课
    pub teacher_id: Option<i64>,
    pub section_id: i64,
}

/// 按教师查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course_assignment.ts")]
pub struct ByTeacherParams {
    /// 不填时默认为调用者本人
    pub teacher_id: Option<i64>,
}
