//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub subject_code: String,
    pub subject_name: String,
    pub credits: i32,
    pub department_id: i64,
    pub semester: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::work_items::Entity")]
    WorkItems,
    #[sea_orm(has_many = "super::subject_teacher_sections::Entity")]
    SubjectTeacherSections,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::work_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject(self) -> crate::models::directory::Subject {
        use chrono::{DateTime, Utc};

        crate::models::directory::Subject {
            id: self.id,
            code: self.subject_code,
            name: self.subject_name,
            credits: self.credits,
            department_id: self.department_id,
            semester: self.semester,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }

    pub fn into_brief(self) -> crate::models::directory::SubjectBrief {
        crate::models::directory::SubjectBrief {
            id: self.id,
            name: self.subject_name,
            code: self.subject_code,
        }
    }
}
