use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::work_items::WorkItemKind;

/// 提交指向的考核项引用
///
/// 旧接口用三个可空外键表达"三选一"，非法状态（全空/多选）只能靠运行时校验。
/// 这里改用 sum type，让非法状态在类型上不可表示；
/// 三可空字段的旧形状只保留在请求解析层（见 requests.rs）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "item_id", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum ItemRef {
    Assignment(i64),
    Quiz(i64),
    Test(i64),
}

impl ItemRef {
    pub fn kind(&self) -> WorkItemKind {
        match self {
            ItemRef::Assignment(_) => WorkItemKind::Assignment,
            ItemRef::Quiz(_) => WorkItemKind::Quiz,
            ItemRef::Test(_) => WorkItemKind::Test,
        }
    }

    pub fn item_id(&self) -> i64 {
        match self {
            ItemRef::Assignment(id) | ItemRef::Quiz(id) | ItemRef::Test(id) => *id,
        }
    }

    pub fn from_kind(kind: WorkItemKind, item_id: i64) -> Self {
        match kind {
            WorkItemKind::Assignment => ItemRef::Assignment(item_id),
            WorkItemKind::Quiz => ItemRef::Quiz(item_id),
            WorkItemKind::Test => ItemRef::Test(item_id),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub item: ItemRef,
    pub submitted_at: DateTime<Utc>,
    pub is_evaluated: bool,
    pub obtained_marks: Option<i32>,
    pub file_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ref_accessors() {
        let r = ItemRef::Quiz(42);
        assert_eq!(r.kind(), WorkItemKind::Quiz);
        assert_eq!(r.item_id(), 42);
        assert_eq!(ItemRef::from_kind(WorkItemKind::Quiz, 42), r);
    }

    #[test]
    fn test_item_ref_serde_shape() {
        let r = ItemRef::Test(7);
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["kind"], "test");
        assert_eq!(json["item_id"], 7);
    }
}
