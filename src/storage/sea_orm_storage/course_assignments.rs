//! 排课存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::sections::{Column as SectionColumn, Entity as Sections};
use crate::entity::student_profiles::{Column as StudentProfileColumn, Entity as StudentProfiles};
use crate::entity::subject_teacher_sections::{
    ActiveModel, Column, Entity as SubjectTeacherSections,
};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    course_assignments::{
        entities::CourseAssignment,
        responses::{CourseAssignmentView, RosterEntry, TaughtStudent},
    },
    directory::{SectionBrief, SubjectBrief},
    users::UserBrief,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 排课
    ///
    /// active_key 的唯一约束兜底并发重复排课，
    /// 冲突以数据库错误返回，由服务层归类。
    pub async fn assign_course_impl(
        &self,
        subject_id: i64,
        teacher_id: i64,
        section_id: i64,
    ) -> Result<CourseAssignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(subject_id),
            teacher_id: Set(teacher_id),
            section_id: Set(section_id),
            active_key: Set(Some(CourseAssignment::active_key(
                subject_id, teacher_id, section_id,
            ))),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建排课失败: {e}")))?;

        Ok(result.into_course_assignment())
    }

    /// 通过 ID 获取排课记录
    pub async fn get_course_assignment_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<CourseAssignment>> {
        let result = SubjectTeacherSections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询排课失败: {e}")))?;

        Ok(result.map(|m| m.into_course_assignment()))
    }

    /// 获取排课视图
    pub async fn get_course_assignment_view_impl(
        &self,
        id: i64,
    ) -> Result<Option<CourseAssignmentView>> {
        let Some(assignment) = self.get_course_assignment_by_id_impl(id).await? else {
            return Ok(None);
        };

        let subject = self
            .subject_brief(assignment.subject_id)
            .await?
            .ok_or_else(|| EduSystemError::not_found("排课指向的科目不存在"))?;
        let section = self
            .section_brief(assignment.section_id)
            .await?
            .ok_or_else(|| EduSystemError::not_found("排课指向的班级不存在"))?;
        let teacher = self
            .teacher_user_brief(assignment.teacher_id)
            .await?
            .ok_or_else(|| EduSystemError::not_found("排课指向的教师不存在"))?;

        Ok(Some(CourseAssignmentView {
            id: assignment.id,
            subject,
            teacher,
            section,
            is_active: assignment.is_active,
            created_at: assignment.created_at,
        }))
    }

    /// 停用排课（幂等）
    ///
    /// 同时清空 active_key，为同一三元组的重新排课让路。
    pub async fn deactivate_course_assignment_impl(&self, id: i64) -> Result<bool> {
        let existing = SubjectTeacherSections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询排课失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        if existing.is_active {
            let mut model: ActiveModel = existing.into();
            model.is_active = Set(false);
            model.active_key = Set(None);
            model.updated_at = Set(chrono::Utc::now().timestamp());
            model
                .update(&self.db)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("停用排课失败: {e}")))?;
        }

        Ok(true)
    }

    /// 教师是否在某科目（及班级）有活跃排课
    pub async fn has_active_course_assignment_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
        section_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = SubjectTeacherSections::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::IsActive.eq(true));
        if let Some(section_id) = section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询排课失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教师任教的 (班级, 科目) 组合（去重）
    pub async fn roster_for_teacher_impl(&self, teacher_id: i64) -> Result<Vec<RosterEntry>> {
        let assignments = SubjectTeacherSections::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询排课失败: {e}")))?;

        let pairs: Vec<(i64, i64)> = assignments
            .iter()
            .map(|a| (a.section_id, a.subject_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let section_map = self
            .section_brief_map(pairs.iter().map(|(s, _)| *s).collect())
            .await?;
        let subject_map = self
            .subject_brief_map(pairs.iter().map(|(_, s)| *s).collect())
            .await?;

        let mut entries: Vec<RosterEntry> = pairs
            .into_iter()
            .filter_map(|(section_id, subject_id)| {
                Some(RosterEntry {
                    section: section_map.get(&section_id)?.clone(),
                    subject: subject_map.get(&subject_id)?.clone(),
                })
            })
            .collect();
        entries.sort_by(|a, b| (a.section.id, a.subject.id).cmp(&(b.section.id, b.subject.id)));
        Ok(entries)
    }

    /// 教师名下的学生（经活跃排课到班级再到学生，去重）
    pub async fn students_for_teacher_impl(&self, teacher_id: i64) -> Result<Vec<TaughtStudent>> {
        let assignments = SubjectTeacherSections::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询排课失败: {e}")))?;

        let section_ids: Vec<i64> = assignments
            .iter()
            .map(|a| a.section_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if section_ids.is_empty() {
            return Ok(vec![]);
        }

        let section_map = self.section_brief_map(section_ids.clone()).await?;

        let profiles = StudentProfiles::find()
            .filter(StudentProfileColumn::SectionId.is_in(section_ids))
            .filter(StudentProfileColumn::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生档案失败: {e}")))?;

        let user_ids: Vec<i64> = profiles.iter().map(|p| p.user_id).collect();
        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户信息失败: {e}")))?;
        let user_map: HashMap<i64, UserBrief> =
            users.into_iter().map(|u| (u.id, u.into_brief())).collect();

        let mut students: Vec<TaughtStudent> = profiles
            .into_iter()
            .filter_map(|p| {
                Some(TaughtStudent {
                    id: p.id,
                    user: user_map.get(&p.user_id)?.clone(),
                    registration_number: p.registration_number,
                    section: section_map.get(&p.section_id)?.clone(),
                })
            })
            .collect();
        students.sort_by_key(|s| s.id);
        Ok(students)
    }

    // 视图组装用的小工具

    async fn subject_brief(&self, id: i64) -> Result<Option<SubjectBrief>> {
        Ok(Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询科目失败: {e}")))?
            .map(|s| s.into_brief()))
    }

    async fn section_brief(&self, id: i64) -> Result<Option<SectionBrief>> {
        Ok(Sections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询班级失败: {e}")))?
            .map(|s| s.into_brief()))
    }

    async fn teacher_user_brief(&self, teacher_profile_id: i64) -> Result<Option<UserBrief>> {
        let Some(profile) = self.get_teacher_profile_by_id_impl(teacher_profile_id).await? else {
            return Ok(None);
        };
        Ok(Users::find_by_id(profile.user_id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户失败: {e}")))?
            .map(|u| u.into_brief()))
    }

    async fn subject_brief_map(&self, ids: Vec<i64>) -> Result<HashMap<i64, SubjectBrief>> {
        let subjects = Subjects::find()
            .filter(SubjectColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询科目信息失败: {e}")))?;
        Ok(subjects.into_iter().map(|s| (s.id, s.into_brief())).collect())
    }

    async fn section_brief_map(&self, ids: Vec<i64>) -> Result<HashMap<i64, SectionBrief>> {
        let sections = Sections::find()
            .filter(SectionColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询班级信息失败: {e}")))?;
        Ok(sections.into_iter().map(|s| (s.id, s.into_brief())).collect())
    }
}
