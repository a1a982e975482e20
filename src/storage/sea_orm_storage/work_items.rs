//! 考核项存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::sections::{Column as SectionColumn, Entity as Sections};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teacher_profiles::{Column as TeacherProfileColumn, Entity as TeacherProfiles};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::entity::work_items::{ActiveModel, Column, Entity as WorkItems, Model};
use crate::errors::{EduSystemError, Result};
use crate::models::{
    PaginationInfo,
    directory::{SectionBrief, SubjectBrief},
    users::UserBrief,
    work_items::{
        entities::{WorkItem, WorkItemDetail, WorkItemKind},
        requests::WorkItemListQuery,
        responses::{WorkItemListResponse, WorkItemView},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建考核项
    pub async fn create_work_item_impl(
        &self,
        teacher_id: i64,
        title: &str,
        subject_id: i64,
        section_id: Option<i64>,
        detail: WorkItemDetail,
    ) -> Result<WorkItem> {
        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            kind: Set(detail.kind().to_string()),
            title: Set(title.to_string()),
            subject_id: Set(subject_id),
            teacher_id: Set(teacher_id),
            section_id: Set(section_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Self::apply_detail_columns(&mut model, &detail);

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建考核项失败: {e}")))?;

        result.into_work_item()
    }

    /// 把类型特有字段写进可空列
    fn apply_detail_columns(model: &mut ActiveModel, detail: &WorkItemDetail) {
        match detail {
            WorkItemDetail::Assignment {
                description,
                due_date,
            } => {
                model.description = Set(description.clone());
                model.due_date = Set(Some(due_date.timestamp()));
                model.scheduled_date = Set(None);
                model.total_marks = Set(None);
            }
            WorkItemDetail::Quiz { total_marks } => {
                model.description = Set(None);
                model.due_date = Set(None);
                model.scheduled_date = Set(None);
                model.total_marks = Set(Some(*total_marks));
            }
            WorkItemDetail::Test {
                scheduled_date,
                total_marks,
            } => {
                model.description = Set(None);
                model.due_date = Set(None);
                model.scheduled_date = Set(Some(scheduled_date.timestamp()));
                model.total_marks = Set(Some(*total_marks));
            }
        }
    }

    /// 通过 ID 获取考核项
    pub async fn get_work_item_by_id_impl(&self, id: i64) -> Result<Option<WorkItem>> {
        let result = WorkItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考核项失败: {e}")))?;

        result.map(|m| m.into_work_item()).transpose()
    }

    /// 获取考核项视图
    pub async fn get_work_item_view_impl(&self, id: i64) -> Result<Option<WorkItemView>> {
        let result = WorkItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考核项失败: {e}")))?;

        match result {
            Some(model) => Ok(self.assemble_work_item_views(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 更新考核项
    pub async fn update_work_item_impl(
        &self,
        id: i64,
        title: Option<String>,
        detail: WorkItemDetail,
    ) -> Result<Option<WorkItem>> {
        let existing = WorkItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考核项失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = title {
            model.title = Set(title);
        }
        Self::apply_detail_columns(&mut model, &detail);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("更新考核项失败: {e}")))?;

        result.into_work_item().map(Some)
    }

    /// 停用考核项（幂等，不触碰已有提交）
    pub async fn deactivate_work_item_impl(&self, id: i64) -> Result<bool> {
        let existing = WorkItems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询考核项失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        if existing.is_active {
            let mut model: ActiveModel = existing.into();
            model.is_active = Set(false);
            model.updated_at = Set(chrono::Utc::now().timestamp());
            model
                .update(&self.db)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("停用考核项失败: {e}")))?;
        }

        Ok(true)
    }

    /// 列出考核项（分页，默认按创建时间倒序）
    pub async fn list_work_items_with_pagination_impl(
        &self,
        query: WorkItemListQuery,
    ) -> Result<WorkItemListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = WorkItems::find().filter(Column::IsActive.eq(true));

        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }
        if let Some(section_id) = query.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(ref search) = query.search {
            let pattern = format!("%{}%", escape_like_pattern(search));
            select = select.filter(Column::Title.like(pattern));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            EduSystemError::database_operation(format!("查询考核项总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            EduSystemError::database_operation(format!("查询考核项页数失败: {e}"))
        })?;
        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            EduSystemError::database_operation(format!("查询考核项列表失败: {e}"))
        })?;

        let items = self.assemble_work_item_views(models).await?;

        Ok(WorkItemListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出指定类型未来的考核项，按截止/考试时间升序
    ///
    /// 时间分散在 due_date / scheduled_date 两列，跨列排序在内存完成。
    /// 测验没有时间属性，查询结果恒为空。
    pub async fn list_upcoming_work_items_impl(
        &self,
        kind: WorkItemKind,
        section_id: Option<i64>,
    ) -> Result<Vec<WorkItemView>> {
        let now = chrono::Utc::now().timestamp();

        let mut select = WorkItems::find()
            .filter(Column::IsActive.eq(true))
            .filter(Column::Kind.eq(kind.to_string()))
            .filter(
                Condition::any()
                    .add(Column::DueDate.gt(now))
                    .add(Column::ScheduledDate.gt(now)),
            );
        if let Some(section_id) = section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }

        let models = select.all(&self.db).await.map_err(|e| {
            EduSystemError::database_operation(format!("查询未来考核项失败: {e}"))
        })?;

        let mut views = self.assemble_work_item_views(models).await?;
        views.sort_by_key(|v| v.due_date.or(v.scheduled_date));
        Ok(views)
    }

    /// 批量补齐科目/教师/班级信息并组装视图
    pub(crate) async fn assemble_work_item_views(
        &self,
        models: Vec<Model>,
    ) -> Result<Vec<WorkItemView>> {
        let now = chrono::Utc::now();

        let subject_ids: Vec<i64> = models
            .iter()
            .map(|m| m.subject_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let teacher_ids: Vec<i64> = models
            .iter()
            .map(|m| m.teacher_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let section_ids: Vec<i64> = models
            .iter()
            .filter_map(|m| m.section_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let subjects = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询科目信息失败: {e}")))?;
        let subject_map: HashMap<i64, SubjectBrief> = subjects
            .into_iter()
            .map(|s| (s.id, s.into_brief()))
            .collect();

        let profiles = TeacherProfiles::find()
            .filter(TeacherProfileColumn::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询教师档案失败: {e}")))?;
        let user_ids: Vec<i64> = profiles.iter().map(|p| p.user_id).collect();
        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询用户信息失败: {e}")))?;
        let user_map: HashMap<i64, UserBrief> =
            users.into_iter().map(|u| (u.id, u.into_brief())).collect();
        let teacher_map: HashMap<i64, UserBrief> = profiles
            .into_iter()
            .filter_map(|p| user_map.get(&p.user_id).cloned().map(|u| (p.id, u)))
            .collect();

        let sections = Sections::find()
            .filter(SectionColumn::Id.is_in(section_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询班级信息失败: {e}")))?;
        let section_map: HashMap<i64, SectionBrief> = sections
            .into_iter()
            .map(|s| (s.id, s.into_brief()))
            .collect();

        let mut views = Vec::with_capacity(models.len());
        for model in models {
            let item = model.into_work_item()?;
            let subject = subject_map
                .get(&item.subject_id)
                .cloned()
                .unwrap_or(SubjectBrief {
                    id: item.subject_id,
                    name: "未知科目".to_string(),
                    code: String::new(),
                });
            let teacher = teacher_map
                .get(&item.teacher_id)
                .cloned()
                .unwrap_or(UserBrief {
                    id: item.teacher_id,
                    username: "未知教师".to_string(),
                    email: String::new(),
                });
            let section = item.section_id.and_then(|id| section_map.get(&id).cloned());
            views.push(WorkItemView::from_item(item, subject, teacher, section, now));
        }
        Ok(views)
    }
}
