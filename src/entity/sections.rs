//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub section_code: String,
    pub section_name: String,
    pub department_id: i64,
    pub current_semester: i32,
    pub academic_year: String,
    pub batch_year: i32,
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
    #[sea_orm(has_many = "super::student_profiles::Entity")]
    StudentProfiles,
    #[sea_orm(has_many = "super::subject_teacher_sections::Entity")]
    SubjectTeacherSections,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_section(self) -> crate::models::directory::Section {
        use chrono::{DateTime, Utc};

        crate::models::directory::Section {
            id: self.id,
            code: self.section_code,
            name: self.section_name,
            department_id: self.department_id,
            current_semester: self.current_semester,
            academic_year: self.academic_year,
            batch_year: self.batch_year,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }

    pub fn into_brief(self) -> crate::models::directory::SectionBrief {
        crate::models::directory::SectionBrief {
            id: self.id,
            name: self.section_name,
            code: self.section_code,
        }
    }
}
