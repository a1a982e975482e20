//! 提交实体

use sea_orm::entity::prelude::*;
use std::str::FromStr;

use crate::errors::EduSystemError;
use crate::models::submissions::{ItemRef, Submission};
use crate::models::work_items::WorkItemKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub work_item_id: i64,
    pub kind: String,
    pub submitted_at: i64,
    pub is_evaluated: bool,
    pub obtained_marks: Option<i32>,
    pub file_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_items::Entity",
        from = "Column::WorkItemId",
        to = "super::work_items::Column::Id"
    )]
    WorkItem,
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id"
    )]
    Student,
}

impl Related<super::work_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkItem.def()
    }
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::errors::Result<Submission> {
        use chrono::{DateTime, Utc};

        let kind = WorkItemKind::from_str(&self.kind).map_err(|_| {
            EduSystemError::database_operation(format!(
                "提交 {} 的 kind 列不合法: {}",
                self.id, self.kind
            ))
        })?;

        Ok(Submission {
            id: self.id,
            student_id: self.student_id,
            item: ItemRef::from_kind(kind, self.work_item_id),
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
            is_evaluated: self.is_evaluated,
            obtained_marks: self.obtained_marks,
            file_url: self.file_url,
        })
    }
}
