//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod course_assignments;
mod directory;
mod submissions;
mod users;
mod work_items;

use crate::config::AppConfig;
use crate::errors::{EduSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EduSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    course_assignments::{
        entities::CourseAssignment,
        responses::{CourseAssignmentView, RosterEntry, TaughtStudent},
    },
    directory::{Section, Subject},
    submissions::{
        entities::{ItemRef, Submission},
        requests::SubmissionListQuery,
        responses::{SubmissionListResponse, SubmissionView},
    },
    users::{StudentProfile, TeacherProfile, User},
    work_items::{
        entities::{WorkItem, WorkItemDetail, WorkItemKind},
        requests::WorkItemListQuery,
        responses::{WorkItemListResponse, WorkItemView},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 身份目录
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_teacher_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_user_id_impl(user_id).await
    }

    async fn get_teacher_profile_by_id(&self, id: i64) -> Result<Option<TeacherProfile>> {
        self.get_teacher_profile_by_id_impl(id).await
    }

    async fn get_student_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_user_id_impl(user_id).await
    }

    async fn get_student_profile_by_id(&self, id: i64) -> Result<Option<StudentProfile>> {
        self.get_student_profile_by_id_impl(id).await
    }

    // 参考目录
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_section_by_id(&self, id: i64) -> Result<Option<Section>> {
        self.get_section_by_id_impl(id).await
    }

    // 考核项模块
    async fn create_work_item(
        &self,
        teacher_id: i64,
        title: &str,
        subject_id: i64,
        section_id: Option<i64>,
        detail: WorkItemDetail,
    ) -> Result<WorkItem> {
        self.create_work_item_impl(teacher_id, title, subject_id, section_id, detail)
            .await
    }

    async fn get_work_item_by_id(&self, id: i64) -> Result<Option<WorkItem>> {
        self.get_work_item_by_id_impl(id).await
    }

    async fn get_work_item_view(&self, id: i64) -> Result<Option<WorkItemView>> {
        self.get_work_item_view_impl(id).await
    }

    async fn update_work_item(
        &self,
        id: i64,
        title: Option<String>,
        detail: WorkItemDetail,
    ) -> Result<Option<WorkItem>> {
        self.update_work_item_impl(id, title, detail).await
    }

    async fn deactivate_work_item(&self, id: i64) -> Result<bool> {
        self.deactivate_work_item_impl(id).await
    }

    async fn list_work_items_with_pagination(
        &self,
        query: WorkItemListQuery,
    ) -> Result<WorkItemListResponse> {
        self.list_work_items_with_pagination_impl(query).await
    }

    async fn list_upcoming_work_items(
        &self,
        kind: WorkItemKind,
        section_id: Option<i64>,
    ) -> Result<Vec<WorkItemView>> {
        self.list_upcoming_work_items_impl(kind, section_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        item: ItemRef,
        file_url: Option<String>,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, item, file_url)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_view(&self, id: i64) -> Result<Option<SubmissionView>> {
        self.get_submission_view_impl(id).await
    }

    async fn evaluate_submission(
        &self,
        id: i64,
        obtained_marks: i32,
    ) -> Result<Option<Submission>> {
        self.evaluate_submission_impl(id, obtained_marks).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    // 排课模块
    async fn assign_course(
        &self,
        subject_id: i64,
        teacher_id: i64,
        section_id: i64,
    ) -> Result<CourseAssignment> {
        self.assign_course_impl(subject_id, teacher_id, section_id)
            .await
    }

    async fn get_course_assignment_by_id(&self, id: i64) -> Result<Option<CourseAssignment>> {
        self.get_course_assignment_by_id_impl(id).await
    }

    async fn get_course_assignment_view(&self, id: i64) -> Result<Option<CourseAssignmentView>> {
        self.get_course_assignment_view_impl(id).await
    }

    async fn deactivate_course_assignment(&self, id: i64) -> Result<bool> {
        self.deactivate_course_assignment_impl(id).await
    }

    async fn has_active_course_assignment(
        &self,
        teacher_id: i64,
        subject_id: i64,
        section_id: Option<i64>,
    ) -> Result<bool> {
        self.has_active_course_assignment_impl(teacher_id, subject_id, section_id)
            .await
    }

    async fn roster_for_teacher(&self, teacher_id: i64) -> Result<Vec<RosterEntry>> {
        self.roster_for_teacher_impl(teacher_id).await
    }

    async fn students_for_teacher(&self, teacher_id: i64) -> Result<Vec<TaughtStudent>> {
        self.students_for_teacher_impl(teacher_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity;
    use crate::models::submissions::entities::ItemRef;
    use chrono::{TimeDelta, Utc};
    use sea_orm::{ActiveModelTrait, Set};

    /// 内存 SQLite 存储，约束行为与生产 SQLite 一致
    async fn test_storage() -> SeaOrmStorage {
        // 单连接，保证内存库在整个测试期间存活
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmStorage { db }
    }

    /// 铺好外键链：院系 -> 班级/科目 -> 教师/学生
    ///
    /// 返回 (teacher_profile_id, student_profile_id, subject_id, section_id)
    async fn seed_directory(storage: &SeaOrmStorage) -> (i64, i64, i64, i64) {
        let now = Utc::now().timestamp();
        let db = &storage.db;

        let dept = entity::departments::ActiveModel {
            department_code: Set("CS".to_string()),
            department_name: Set("计算机系".to_string()),
            short_name: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let section = entity::sections::ActiveModel {
            section_code: Set("CS-2024-A".to_string()),
            section_name: Set("计科 2024 级 A 班".to_string()),
            department_id: Set(dept.id),
            current_semester: Set(1),
            academic_year: Set("2024-2025".to_string()),
            batch_year: Set(2024),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let subject = entity::subjects::ActiveModel {
            subject_code: Set("CS101".to_string()),
            subject_name: Set("程序设计基础".to_string()),
            credits: Set(3),
            department_id: Set(dept.id),
            semester: Set(1),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let teacher_user = entity::users::ActiveModel {
            username: Set("teacher_zhang".to_string()),
            email: Set("zhang@example.com".to_string()),
            role: Set("teacher".to_string()),
            is_active: Set(true),
            is_verified: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let teacher = entity::teacher_profiles::ActiveModel {
            user_id: Set(teacher_user.id),
            employee_id: Set(Some("T001".to_string())),
            designation: Set("讲师".to_string()),
            qualification: Set("硕士".to_string()),
            experience_years: Set(3.0),
            department_id: Set(Some(dept.id)),
            office_location: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let student_user = entity::users::ActiveModel {
            username: Set("student_li".to_string()),
            email: Set("li@example.com".to_string()),
            role: Set("student".to_string()),
            is_active: Set(true),
            is_verified: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let student = entity::student_profiles::ActiveModel {
            user_id: Set(student_user.id),
            section_id: Set(section.id),
            registration_number: Set(Some("S2024001".to_string())),
            admission_year: Set(2024),
            current_semester: Set(1),
            batch_year: Set(2024),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        (teacher.id, student.id, subject.id, section.id)
    }

    #[tokio::test]
    async fn test_duplicate_submission_hits_unique_index() {
        let storage = test_storage().await;
        let (teacher_id, student_id, subject_id, section_id) = seed_directory(&storage).await;

        let item = storage
            .create_work_item_impl(
                teacher_id,
                "第一章阅读笔记",
                subject_id,
                Some(section_id),
                WorkItemDetail::Assignment {
                    description: None,
                    due_date: Utc::now() + TimeDelta::days(7),
                },
            )
            .await
            .unwrap();

        let item_ref = ItemRef::Assignment(item.id);
        storage
            .create_submission_impl(student_id, item_ref, None)
            .await
            .unwrap();

        // 同一 (student_id, work_item_id) 的第二次插入撞唯一索引
        let err = storage
            .create_submission_impl(student_id, item_ref, None)
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_reassign_after_deactivate() {
        let storage = test_storage().await;
        let (teacher_id, _, subject_id, section_id) = seed_directory(&storage).await;

        let first = storage
            .assign_course_impl(subject_id, teacher_id, section_id)
            .await
            .unwrap();

        // 活跃期间重复排课撞 active_key 唯一约束
        let dup = storage
            .assign_course_impl(subject_id, teacher_id, section_id)
            .await
            .unwrap_err();
        assert!(dup.is_unique_violation());

        assert!(
            storage
                .deactivate_course_assignment_impl(first.id)
                .await
                .unwrap()
        );

        // 停用清空 active_key 后，同一三元组可以重新排课
        let again = storage
            .assign_course_impl(subject_id, teacher_id, section_id)
            .await
            .unwrap();
        assert_ne!(again.id, first.id);
        assert!(again.is_active);
    }

    #[tokio::test]
    async fn test_evaluate_enforces_grading_ceiling() {
        let storage = test_storage().await;
        let (teacher_id, student_id, subject_id, _) = seed_directory(&storage).await;

        let quiz = storage
            .create_work_item_impl(
                teacher_id,
                "单元小测",
                subject_id,
                None,
                WorkItemDetail::Quiz { total_marks: 3 },
            )
            .await
            .unwrap();
        let submission = storage
            .create_submission_impl(student_id, ItemRef::Quiz(quiz.id), None)
            .await
            .unwrap();

        let err = storage
            .evaluate_submission_impl(submission.id, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, EduSystemError::Validation(_)));

        // 超限评分被拒后事务回滚，不留半写状态
        let untouched = storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!untouched.is_evaluated);
        assert_eq!(untouched.obtained_marks, None);

        let graded = storage
            .evaluate_submission_impl(submission.id, 3)
            .await
            .unwrap()
            .unwrap();
        assert!(graded.is_evaluated);
        assert_eq!(graded.obtained_marks, Some(3));
    }
}
