use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::directory::{SectionBrief, SubjectBrief};
use crate::models::users::UserBrief;

/// 排课视图
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course_assignment.ts")]
pub struct CourseAssignmentView {
    pub id: i64,
    pub subject: SubjectBrief,
    pub teacher: UserBrief,
    pub section: SectionBrief,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 教师任教的 (班级, 科目) 组合
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course_assignment.ts")]
pub struct RosterEntry {
    pub section: SectionBrief,
    pub subject: SubjectBrief,
}

/// 教师名下的学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course_assignment.ts")]
pub struct TaughtStudent {
    /// 学生档案 id
    pub id: i64,
    pub user: UserBrief,
    pub registration_number: Option<String>,
    pub section: SectionBrief,
}
