use serde::Deserialize;
use ts_rs::TS;

use crate::models::ErrorCode;
use crate::models::common::pagination::PaginationQuery;
use crate::models::submissions::entities::ItemRef;
use crate::models::work_items::WorkItemKind;

/// 创建提交请求
///
/// 保留旧接口的"三个可空 id"形状，解析时收敛为 ItemRef。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    /// 不填时默认为调用者本人（学生）
    pub student_id: Option<i64>,
    pub kind: WorkItemKind,
    pub assignment_id: Option<i64>,
    pub quiz_id: Option<i64>,
    pub test_id: Option<i64>,
    pub file_url: Option<String>,
}

/// 提交请求校验错误
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionRequestError {
    Malformed(String),
    KindMismatch(String),
}

impl SubmissionRequestError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SubmissionRequestError::Malformed(_) => ErrorCode::MalformedSubmission,
            SubmissionRequestError::KindMismatch(_) => ErrorCode::KindMismatch,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionRequestError::Malformed(msg) => msg,
            SubmissionRequestError::KindMismatch(msg) => msg,
        }
    }
}

impl CreateSubmissionRequest {
    /// 把三可空 id 收敛为考核项引用
    ///
    /// 先校验"恰好填一个"，再校验 kind 与所填字段一致。
    pub fn item_ref(&self) -> Result<ItemRef, SubmissionRequestError> {
        let supplied = [
            self.assignment_id.map(ItemRef::Assignment),
            self.quiz_id.map(ItemRef::Quiz),
            self.test_id.map(ItemRef::Test),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        let item = match supplied.as_slice() {
            [one] => *one,
            [] => {
                return Err(SubmissionRequestError::Malformed(
                    "必须且只能填写 assignment_id / quiz_id / test_id 之一，当前一个都没填"
                        .to_string(),
                ));
            }
            _ => {
                return Err(SubmissionRequestError::Malformed(format!(
                    "必须且只能填写 assignment_id / quiz_id / test_id 之一，当前填了 {} 个",
                    supplied.len()
                )));
            }
        };

        if item.kind() != self.kind {
            return Err(SubmissionRequestError::KindMismatch(format!(
                "kind 为 {}，但填写的是 {}_id",
                self.kind,
                item.kind()
            )));
        }
        Ok(item)
    }
}

/// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct EvaluateSubmissionRequest {
    pub obtained_marks: i32,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub section_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<WorkItemKind>,
    pub student_id: Option<i64>,
    /// true 时只列未评分的提交，按提交时间升序（先交先评）
    pub pending: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub section_id: Option<i64>,
    pub kind: Option<WorkItemKind>,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub pending_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request(kind: WorkItemKind) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            student_id: None,
            kind,
            assignment_id: None,
            quiz_id: None,
            test_id: None,
            file_url: None,
        }
    }

    #[test]
    fn test_none_supplied_is_malformed() {
        let req = base_request(WorkItemKind::Quiz);
        assert!(matches!(
            req.item_ref(),
            Err(SubmissionRequestError::Malformed(_))
        ));
    }

    #[test]
    fn test_multiple_supplied_is_malformed() {
        let mut req = base_request(WorkItemKind::Quiz);
        req.quiz_id = Some(1);
        req.test_id = Some(2);
        assert!(matches!(
            req.item_ref(),
            Err(SubmissionRequestError::Malformed(_))
        ));
    }

    #[test]
    fn test_kind_must_match_supplied_field() {
        let mut req = base_request(WorkItemKind::Quiz);
        req.assignment_id = Some(1);
        assert!(matches!(
            req.item_ref(),
            Err(SubmissionRequestError::KindMismatch(_))
        ));
    }

    #[test]
    fn test_exactly_one_matching_ok() {
        let mut req = base_request(WorkItemKind::Test);
        req.test_id = Some(9);
        assert_eq!(req.item_ref().unwrap(), ItemRef::Test(9));
    }
}
