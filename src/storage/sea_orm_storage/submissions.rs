//! 提交存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::student_profiles::{Column as StudentProfileColumn, Entity as StudentProfiles};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::entity::work_items::{Column as WorkItemColumn, Entity as WorkItems};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    directory::SubjectBrief,
    submissions::{
        entities::{ItemRef, Submission},
        requests::SubmissionListQuery,
        responses::{SubmissionListResponse, SubmissionView},
    },
    users::UserBrief,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// (student_id, work_item_id) 的唯一索引兜底并发重复提交，
    /// 冲突以数据库错误返回，由服务层归类。
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        item: ItemRef,
        file_url: Option<String>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            work_item_id: Set(item.item_id()),
            kind: Set(item.kind().to_string()),
            submitted_at: Set(now),
            is_evaluated: Set(false),
            obtained_marks: Set(None),
            file_url: Set(file_url),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建提交失败: {e}")))?;

        result.into_submission()
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交失败: {e}")))?;

        result.map(|m| m.into_submission()).transpose()
    }

    /// 获取提交视图
    pub async fn get_submission_view_impl(&self, id: i64) -> Result<Option<SubmissionView>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交失败: {e}")))?;

        match result {
            Some(model) => Ok(self.assemble_submission_views(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 评分
    ///
    /// 在事务内复核评分上限再落库，保证上限检查与写入的原子性。
    /// 重复评分允许覆盖。
    pub async fn evaluate_submission_impl(
        &self,
        id: i64,
        obtained_marks: i32,
    ) -> Result<Option<Submission>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(submission) = Submissions::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let item = WorkItems::find_by_id(submission.work_item_id)
            .one(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考核项失败: {e}")))?
            .ok_or_else(|| {
                EduSystemError::database_operation(format!(
                    "提交 {} 指向的考核项 {} 不存在",
                    id, submission.work_item_id
                ))
            })?
            .into_work_item()?;

        if let Some(ceiling) = item.detail.grading_ceiling()
            && obtained_marks > ceiling
        {
            return Err(EduSystemError::validation(format!(
                "得分 {obtained_marks} 超出评分上限 {ceiling}"
            )));
        }

        let mut model: ActiveModel = submission.into();
        model.obtained_marks = Set(Some(obtained_marks));
        model.is_evaluated = Set(true);
        let result = model
            .update(&txn)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("写入评分失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("提交事务失败: {e}")))?;

        result.into_submission().map(Some)
    }

    /// 列出提交（分页）
    ///
    /// 常规列表按提交时间倒序；待评分队列按提交时间升序（先交先评）。
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 班级/教师过滤要经考核项中转
        if query.section_id.is_some() || query.teacher_id.is_some() {
            let mut item_select = WorkItems::find();
            if let Some(section_id) = query.section_id {
                item_select = item_select.filter(WorkItemColumn::SectionId.eq(section_id));
            }
            if let Some(teacher_id) = query.teacher_id {
                item_select = item_select.filter(WorkItemColumn::TeacherId.eq(teacher_id));
            }
            let item_ids: Vec<i64> = item_select
                .all(&self.db)
                .await
                .map_err(|e| {
                    EduSystemError::database_operation(format!("查询考核项失败: {e}"))
                })?
                .into_iter()
                .map(|m| m.id)
                .collect();
            select = select.filter(Column::WorkItemId.is_in(item_ids));
        }

        select = if query.pending_only {
            select
                .filter(Column::IsEvaluated.eq(false))
                .order_by_asc(Column::SubmittedAt)
        } else {
            select.order_by_desc(Column::SubmittedAt)
        };

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        let items = self.assemble_submission_views(models).await?;

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 批量补齐学生/考核项/科目信息并组装视图
    async fn assemble_submission_views(&self, models: Vec<Model>) -> Result<Vec<SubmissionView>> {
        let item_ids: Vec<i64> = models
            .iter()
            .map(|m| m.work_item_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let student_ids: Vec<i64> = models
            .iter()
            .map(|m| m.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let item_models = WorkItems::find()
            .filter(WorkItemColumn::Id.is_in(item_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考核项失败: {e}")))?;
        let subject_ids: Vec<i64> = item_models
            .iter()
            .map(|m| m.subject_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let mut item_map = HashMap::new();
        for model in item_models {
            item_map.insert(model.id, model.into_work_item()?);
        }

        let subjects = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询科目信息失败: {e}")))?;
        let subject_map: HashMap<i64, SubjectBrief> = subjects
            .into_iter()
            .map(|s| (s.id, s.into_brief()))
            .collect();

        let profiles = StudentProfiles::find()
            .filter(StudentProfileColumn::Id.is_in(student_ids))
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
        let student_map: HashMap<i64, UserBrief> = profiles
            .into_iter()
            .filter_map(|p| user_map.get(&p.user_id).cloned().map(|u| (p.id, u)))
            .collect();

        let mut views = Vec::with_capacity(models.len());
        for model in models {
            let submission = model.into_submission()?;
            let Some(item) = item_map.get(&submission.item.item_id()) else {
                // 外键保证下不应出现，出现则跳过而不是整页失败
                tracing::warn!("提交 {} 指向的考核项不存在，跳过", submission.id);
                continue;
            };
            let student = student_map
                .get(&submission.student_id)
                .cloned()
                .unwrap_or(UserBrief {
                    id: submission.student_id,
                    username: "未知学生".to_string(),
                    email: String::new(),
                });
            let subject = subject_map
                .get(&item.subject_id)
                .cloned()
                .unwrap_or(SubjectBrief {
                    id: item.subject_id,
                    name: "未知科目".to_string(),
                    code: String::new(),
                });
            views.push(SubmissionView::from_submission(
                submission, item, student, subject,
            ));
        }
        Ok(views)
    }
}
