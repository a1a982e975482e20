use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginatedResponse;
use crate::models::directory::{SectionBrief, SubjectBrief};
use crate::models::users::UserBrief;
use crate::models::work_items::entities::{WorkItem, WorkItemDetail, WorkItemKind};

pub type WorkItemListResponse = PaginatedResponse<WorkItemView>;

/// 考核项视图（列表/详情响应）
///
/// is_overdue / days_remaining 为查询时派生字段，不落库。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/work_item.ts")]
pub struct WorkItemView {
    pub id: i64,
    pub kind: WorkItemKind,
    pub title: String,
    pub subject: SubjectBrief,
    pub teacher: UserBrief,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionBrief>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<i32>,
    pub is_active: bool,
    pub is_overdue: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkItemView {
    pub fn from_item(
        item: WorkItem,
        subject: SubjectBrief,
        teacher: UserBrief,
        section: Option<SectionBrief>,
        now: DateTime<Utc>,
    ) -> Self {
        let kind = item.kind();
        let is_overdue = item.is_overdue(now);
        let days_remaining = item.days_remaining(now);
        let (description, due_date, scheduled_date, total_marks) = match item.detail {
            WorkItemDetail::Assignment {
                description,
                due_date,
            } => (description, Some(due_date), None, None),
            WorkItemDetail::Quiz { total_marks } => (None, None, None, Some(total_marks)),
            WorkItemDetail::Test {
                scheduled_date,
                total_marks,
            } => (None, None, Some(scheduled_date), Some(total_marks)),
        };
        Self {
            id: item.id,
            kind,
            title: item.title,
            subject,
            teacher,
            section,
            description,
            due_date,
            scheduled_date,
            total_marks,
            is_active: item.is_active,
            is_overdue,
            days_remaining,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
