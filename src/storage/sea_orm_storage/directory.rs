//! 参考目录存储操作（班级/科目，只读）

use super::SeaOrmStorage;
use crate::entity::prelude::{Sections, Subjects};
use crate::errors::{EduSystemError, Result};
use crate::models::directory::{Section, Subject};
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_section_by_id_impl(&self, id: i64) -> Result<Option<Section>> {
        let result = Sections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_section()))
    }

}
