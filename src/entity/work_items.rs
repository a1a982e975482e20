//! 考核项实体
//!
//! 作业/测验/考试合并为带 kind 标签的单表，类型特有字段为可空列。
//! 行到业务模型的转换负责校验列组合的一致性。

use sea_orm::entity::prelude::*;
use std::str::FromStr;

use crate::errors::EduSystemError;
use crate::models::work_items::{WorkItem, WorkItemDetail, WorkItemKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub section_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_date: Option<i64>,
    pub scheduled_date: Option<i64>,
    pub total_marks: Option<i32>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teacher_profiles::Entity",
        from = "Column::TeacherId",
        to = "super::teacher_profiles::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id"
    )]
    Section,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::teacher_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_work_item(self) -> crate::errors::Result<WorkItem> {
        use chrono::{DateTime, Utc};

        let kind = WorkItemKind::from_str(&self.kind)
            .map_err(|_| EduSystemError::database_operation(format!(
                "考核项 {} 的 kind 列不合法: {}",
                self.id, self.kind
            )))?;

        let missing = |column: &str| {
            EduSystemError::database_operation(format!(
                "考核项 {} 缺少 {} 列（kind = {}）",
                self.id, column, kind
            ))
        };

        let detail = match kind {
            WorkItemKind::Assignment => WorkItemDetail::Assignment {
                description: self.description.clone(),
                due_date: self
                    .due_date
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                    .ok_or_else(|| missing("due_date"))?,
            },
            WorkItemKind::Quiz => WorkItemDetail::Quiz {
                total_marks: self.total_marks.ok_or_else(|| missing("total_marks"))?,
            },
            WorkItemKind::Test => WorkItemDetail::Test {
                scheduled_date: self
                    .scheduled_date
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                    .ok_or_else(|| missing("scheduled_date"))?,
                total_marks: self.total_marks.ok_or_else(|| missing("total_marks"))?,
            },
        };

        Ok(WorkItem {
            id: self.id,
            title: self.title,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            section_id: self.section_id,
            detail,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str) -> Model {
        Model {
            id: 1,
            kind: kind.to_string(),
            title: "t".to_string(),
            subject_id: 1,
            teacher_id: 1,
            section_id: None,
            description: None,
            due_date: Some(1_900_000_000),
            scheduled_date: Some(1_900_000_000),
            total_marks: Some(100),
            is_active: true,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_row_to_detail() {
        let item = row("quiz").into_work_item().unwrap();
        assert_eq!(item.kind(), WorkItemKind::Quiz);
        assert_eq!(item.detail.grading_ceiling(), Some(100));
    }

    #[test]
    fn test_inconsistent_row_is_rejected() {
        let mut r = row("assignment");
        r.due_date = None;
        assert!(r.into_work_item().is_err());

        assert!(row("exam").into_work_item().is_err());
    }
}
