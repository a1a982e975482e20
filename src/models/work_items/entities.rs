use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考核项类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub enum WorkItemKind {
    Assignment, // 作业
    Quiz,       // 测验
    Test,       // 考试
}

impl WorkItemKind {
    pub const ASSIGNMENT: &'static str = "assignment";
    pub const QUIZ: &'static str = "quiz";
    pub const TEST: &'static str = "test";
}

impl<'de> Deserialize<'de> for WorkItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            WorkItemKind::ASSIGNMENT => Ok(WorkItemKind::Assignment),
            WorkItemKind::QUIZ => Ok(WorkItemKind::Quiz),
            WorkItemKind::TEST => Ok(WorkItemKind::Test),
            _ => Err(serde::de::Error::custom(format!(
                "无效的考核项类型: '{s}'. 支持的类型: assignment, quiz, test"
            ))),
        }
    }
}

impl std::fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkItemKind::Assignment => write!(f, "{}", WorkItemKind::ASSIGNMENT),
            WorkItemKind::Quiz => write!(f, "{}", WorkItemKind::QUIZ),
            WorkItemKind::Test => write!(f, "{}", WorkItemKind::TEST),
        }
    }
}

impl std::str::FromStr for WorkItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assignment" => Ok(WorkItemKind::Assignment),
            "quiz" => Ok(WorkItemKind::Quiz),
            "test" => Ok(WorkItemKind::Test),
            _ => Err(format!("Invalid work item kind: {s}")),
        }
    }
}

// 考核项的类型特有字段
//
// 用 sum type 表达"每种考核项各有一套附加字段"，
// 从类型上排除缺字段/串字段的非法状态。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub enum WorkItemDetail {
    // 作业：有描述与截止时间，无评分上限
    Assignment {
        description: Option<String>,
        due_date: DateTime<Utc>,
    },
    // 测验：只有评分上限
    Quiz { total_marks: i32 },
    // 考试：有考试时间与评分上限
    Test {
        scheduled_date: DateTime<Utc>,
        total_marks: i32,
    },
}

impl WorkItemDetail {
    pub fn kind(&self) -> WorkItemKind {
        match self {
            WorkItemDetail::Assignment { .. } => WorkItemKind::Assignment,
            WorkItemDetail::Quiz { .. } => WorkItemKind::Quiz,
            WorkItemDetail::Test { .. } => WorkItemKind::Test,
        }
    }

    /// 评分上限（作业没有上限）
    pub fn grading_ceiling(&self) -> Option<i32> {
        match self {
            WorkItemDetail::Assignment { .. } => None,
            WorkItemDetail::Quiz { total_marks } => Some(*total_marks),
            WorkItemDetail::Test { total_marks, .. } => Some(*total_marks),
        }
    }

    /// 截止/考试时间（测验没有时间属性）
    pub fn schedule(&self) -> Option<DateTime<Utc>> {
        match self {
            WorkItemDetail::Assignment { due_date, .. } => Some(*due_date),
            WorkItemDetail::Quiz { .. } => None,
            WorkItemDetail::Test { scheduled_date, .. } => Some(*scheduled_date),
        }
    }
}

// 考核项实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub section_id: Option<i64>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub detail: WorkItemDetail,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkItem {
    pub fn kind(&self) -> WorkItemKind {
        self.detail.kind()
    }

    /// 截止/考试时间是否已过（测验始终为 false）
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.detail.schedule() {
            Some(when) => now > when,
            None => false,
        }
    }

    /// 距离截止/考试的整天数，已过期按 0 计
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.detail
            .schedule()
            .map(|when| (when - now).num_days().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn assignment_due(due_date: DateTime<Utc>) -> WorkItem {
        WorkItem {
            id: 1,
            title: "第一章阅读笔记".to_string(),
            subject_id: 1,
            teacher_id: 1,
            section_id: Some(1),
            detail: WorkItemDetail::Assignment {
                description: None,
                due_date,
            },
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_overdue_boundary() {
        let due = Utc::now();
        let item = assignment_due(due);
        // 恰好在截止时刻不算过期，晚一秒才算
        assert!(!item.is_overdue(due));
        assert!(item.is_overdue(due + TimeDelta::seconds(1)));
    }

    #[test]
    fn test_days_remaining_floor() {
        let now = Utc::now();
        let item = assignment_due(now + TimeDelta::days(3));
        assert_eq!(item.days_remaining(now), Some(3));

        let expired = assignment_due(now - TimeDelta::days(2));
        assert_eq!(expired.days_remaining(now), Some(0));
    }

    #[test]
    fn test_quiz_has_no_schedule() {
        let quiz = WorkItem {
            id: 2,
            title: "单元小测".to_string(),
            subject_id: 1,
            teacher_id: 1,
            section_id: None,
            detail: WorkItemDetail::Quiz { total_marks: 20 },
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!quiz.is_overdue(Utc::now()));
        assert_eq!(quiz.days_remaining(Utc::now()), None);
        assert_eq!(quiz.detail.grading_ceiling(), Some(20));
    }

    #[test]
    fn test_detail_serde_tag() {
        let detail = WorkItemDetail::Test {
            scheduled_date: Utc::now(),
            total_marks: 100,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], "test");
        assert_eq!(json["total_marks"], 100);
    }
}
