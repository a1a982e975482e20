use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::ErrorCode;
use crate::models::common::pagination::PaginationQuery;
use crate::models::work_items::entities::{WorkItemDetail, WorkItemKind};

/// 创建考核项请求（kind 来自路径，不在请求体中）
///
/// kind 决定哪些字段必填，见 `into_detail`。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct CreateWorkItemRequest {
    pub title: String,
    pub subject_id: i64,
    pub section_id: Option<i64>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-09-01T12:00:00Z"
    pub scheduled_date: Option<DateTime<Utc>>, // ISO 8601 格式
    pub total_marks: Option<i32>,
}

/// 考核项请求校验错误
#[derive(Debug, Clone, PartialEq)]
pub enum WorkItemRequestError {
    MissingField(&'static str),
    InvalidSchedule(String),
    InvalidGradingCeiling(String),
}

impl WorkItemRequestError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            WorkItemRequestError::MissingField(_) => ErrorCode::BadRequest,
            WorkItemRequestError::InvalidSchedule(_) => ErrorCode::InvalidSchedule,
            WorkItemRequestError::InvalidGradingCeiling(_) => ErrorCode::InvalidGradingCeiling,
        }
    }

    pub fn message(&self) -> String {
        match self {
            WorkItemRequestError::MissingField(field) => format!("缺少必填字段: {field}"),
            WorkItemRequestError::InvalidSchedule(msg) => msg.clone(),
            WorkItemRequestError::InvalidGradingCeiling(msg) => msg.clone(),
        }
    }
}

impl CreateWorkItemRequest {
    /// 校验并组装类型特有字段
    ///
    /// 截止/考试时间必须严格晚于创建时刻；评分上限必须为正。
    pub fn into_detail(
        &self,
        kind: WorkItemKind,
        now: DateTime<Utc>,
    ) -> Result<WorkItemDetail, WorkItemRequestError> {
        match kind {
            WorkItemKind::Assignment => {
                let due_date = self
                    .due_date
                    .ok_or(WorkItemRequestError::MissingField("due_date"))?;
                if due_date <= now {
                    return Err(WorkItemRequestError::InvalidSchedule(format!(
                        "截止时间必须晚于当前时间: {due_date}"
                    )));
                }
                Ok(WorkItemDetail::Assignment {
                    description: self.description.clone(),
                    due_date,
                })
            }
            WorkItemKind::Quiz => {
                let total_marks = self
                    .total_marks
                    .ok_or(WorkItemRequestError::MissingField("total_marks"))?;
                if total_marks <= 0 {
                    return Err(WorkItemRequestError::InvalidGradingCeiling(format!(
                        "评分上限必须为正整数: {total_marks}"
                    )));
                }
                Ok(WorkItemDetail::Quiz { total_marks })
            }
            WorkItemKind::Test => {
                let scheduled_date = self
                    .scheduled_date
                    .ok_or(WorkItemRequestError::MissingField("scheduled_date"))?;
                let total_marks = self
                    .total_marks
                    .ok_or(WorkItemRequestError::MissingField("total_marks"))?;
                if scheduled_date <= now {
                    return Err(WorkItemRequestError::InvalidSchedule(format!(
                        "考试时间必须晚于当前时间: {scheduled_date}"
                    )));
                }
                if total_marks <= 0 {
                    return Err(WorkItemRequestError::InvalidGradingCeiling(format!(
                        "评分上限必须为正整数: {total_marks}"
                    )));
                }
                Ok(WorkItemDetail::Test {
                    scheduled_date,
                    total_marks,
                })
            }
        }
    }
}

/// 更新考核项请求（只允许改标题与类型特有字段，不允许改 kind）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct UpdateWorkItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式
    pub scheduled_date: Option<DateTime<Utc>>,
    pub total_marks: Option<i32>,
}

impl UpdateWorkItemRequest {
    /// 在现有字段上套用部分更新
    ///
    /// 更新不做"必须未来"校验：条目随时间推移过期是正常状态。
    /// 评分上限仍须为正。
    pub fn apply_to(&self, detail: &WorkItemDetail) -> Result<WorkItemDetail, WorkItemRequestError> {
        if let Some(marks) = self.total_marks
            && marks <= 0
        {
            return Err(WorkItemRequestError::InvalidGradingCeiling(format!(
                "评分上限必须为正整数: {marks}"
            )));
        }
        Ok(match detail {
            WorkItemDetail::Assignment {
                description,
                due_date,
            } => WorkItemDetail::Assignment {
                description: self.description.clone().or_else(|| description.clone()),
                due_date: self.due_date.unwrap_or(*due_date),
            },
            WorkItemDetail::Quiz { total_marks } => WorkItemDetail::Quiz {
                total_marks: self.total_marks.unwrap_or(*total_marks),
            },
            WorkItemDetail::Test {
                scheduled_date,
                total_marks,
            } => WorkItemDetail::Test {
                scheduled_date: self.scheduled_date.unwrap_or(*scheduled_date),
                total_marks: self.total_marks.unwrap_or(*total_marks),
            },
        })
    }
}

/// 考核项列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItemListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct WorkItemListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub kind: Option<WorkItemKind>,
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

/// 未来考核项查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct UpcomingParams {
    pub section_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn base_request() -> CreateWorkItemRequest {
        CreateWorkItemRequest {
            title: "测试条目".to_string(),
            subject_id: 1,
            section_id: Some(1),
            description: None,
            due_date: None,
            scheduled_date: None,
            total_marks: None,
        }
    }

    #[test]
    fn test_assignment_requires_future_due_date() {
        let now = Utc::now();
        let mut req = base_request();
        req.due_date = Some(now - TimeDelta::hours(1));
        assert!(matches!(
            req.into_detail(WorkItemKind::Assignment, now),
            Err(WorkItemRequestError::InvalidSchedule(_))
        ));

        req.due_date = Some(now + TimeDelta::hours(1));
        assert!(req.into_detail(WorkItemKind::Assignment, now).is_ok());
    }

    #[test]
    fn test_quiz_rejects_nonpositive_marks() {
        let now = Utc::now();
        let mut req = base_request();
        req.total_marks = Some(0);
        assert!(matches!(
            req.into_detail(WorkItemKind::Quiz, now),
            Err(WorkItemRequestError::InvalidGradingCeiling(_))
        ));

        req.total_marks = Some(-5);
        assert!(matches!(
            req.into_detail(WorkItemKind::Quiz, now),
            Err(WorkItemRequestError::InvalidGradingCeiling(_))
        ));

        req.total_marks = Some(20);
        assert!(req.into_detail(WorkItemKind::Quiz, now).is_ok());
    }

    #[test]
    fn test_test_requires_both_fields() {
        let now = Utc::now();
        let mut req = base_request();
        req.scheduled_date = Some(now + TimeDelta::days(7));
        assert!(matches!(
            req.into_detail(WorkItemKind::Test, now),
            Err(WorkItemRequestError::MissingField("total_marks"))
        ));

        req.total_marks = Some(100);
        assert!(req.into_detail(WorkItemKind::Test, now).is_ok());
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let due = Utc::now() + TimeDelta::days(3);
        let detail = WorkItemDetail::Assignment {
            description: Some("旧描述".to_string()),
            due_date: due,
        };
        let update = UpdateWorkItemRequest {
            title: None,
            description: None,
            due_date: None,
            scheduled_date: None,
            total_marks: None,
        };
        match update.apply_to(&detail).unwrap() {
            WorkItemDetail::Assignment {
                description,
                due_date,
            } => {
                assert_eq!(description.as_deref(), Some("旧描述"));
                assert_eq!(due_date, due);
            }
            _ => panic!("kind 不应改变"),
        }
    }
}
