use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct Section {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub department_id: i64,
    pub current_semester: i32,
    pub academic_year: String,
    pub batch_year: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub credits: i32,
    pub department_id: i64,
    pub semester: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 科目/班级简要信息（嵌入到其他响应中）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct SubjectBrief {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct SectionBrief {
    pub id: i64,
    pub name: String,
    pub code: String,
}

impl From<&Subject> for SubjectBrief {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            name: subject.name.clone(),
            code: subject.code.clone(),
        }
    }
}

impl From<&Section> for SectionBrief {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id,
            name: section.name.clone(),
            code: section.code.clone(),
        }
    }
}
