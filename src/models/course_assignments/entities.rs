use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 排课记录：(科目, 教师, 班级) 三元组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course_assignment.ts")]
pub struct CourseAssignment {
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub section_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseAssignment {
    /// 活跃行的唯一键
    ///
    /// 落库为可空唯一列：活跃行填 "subject:teacher:section"，停用行置 NULL。
    /// 三种主流数据库都把多个 NULL 视为互不冲突，因此唯一约束只作用于活跃行，
    /// 同一三元组停用后可以重新排课。
    pub fn active_key(subject_id: i64, teacher_id: i64, section_id: i64) -> String {
        format!("{subject_id}:{teacher_id}:{section_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_key_format() {
        assert_eq!(CourseAssignment::active_key(1, 2, 3), "1:2:3");
        // 不同三元组不会拼出同一个键
        assert_ne!(
            CourseAssignment::active_key(12, 3, 4),
            CourseAssignment::active_key(1, 23, 4)
        );
    }
}
