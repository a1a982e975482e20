//! 身份目录存储操作（用户与教师/学生档案，只读）

use super::SeaOrmStorage;
use crate::entity::student_profiles::{
    Column as StudentProfileColumn, Entity as StudentProfiles,
};
use crate::entity::teacher_profiles::{
    Column as TeacherProfileColumn, Entity as TeacherProfiles,
};
use crate::entity::users::Entity as Users;
use crate::errors::{EduSystemError, Result};
use crate::models::users::{StudentProfile, TeacherProfile, User};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户 ID 获取教师档案
    pub async fn get_teacher_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        let result = TeacherProfiles::find()
            .filter(TeacherProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_profile()))
    }

    /// 通过档案 ID 获取教师档案
    pub async fn get_teacher_profile_by_id_impl(&self, id: i64) -> Result<Option<TeacherProfile>> {
        let result = TeacherProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher_profile()))
    }

    /// 通过用户 ID 获取学生档案
    pub async fn get_student_profile_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find()
            .filter(StudentProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }

    /// 通过档案 ID 获取学生档案
    pub async fn get_student_profile_by_id_impl(&self, id: i64) -> Result<Option<StudentProfile>> {
        let result = StudentProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student_profile()))
    }
}
