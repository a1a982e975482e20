//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub employee_id: Option<String>,
    pub designation: String,
    pub qualification: String,
    pub experience_years: f64,
    pub department_id: Option<i64>,
    pub office_location: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::work_items::Entity")]
    WorkItems,
    #[sea_orm(has_many = "super::subject_teacher_sections::Entity")]
    SubjectTeacherSections,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::work_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_profile(self) -> crate::models::users::TeacherProfile {
        use chrono::{DateTime, Utc};

        crate::models::users::TeacherProfile {
            id: self.id,
            user_id: self.user_id,
            employee_id: self.employee_id,
            designation: self.designation,
            qualification: self.qualification,
            experience_years: self.experience_years,
            department_id: self.department_id,
            office_location: self.office_location,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
