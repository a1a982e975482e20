use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginatedResponse;
use crate::models::directory::SubjectBrief;
use crate::models::submissions::entities::Submission;
use crate::models::users::UserBrief;
use crate::models::work_items::{WorkItem, WorkItemKind};
use crate::utils::grading;

pub type SubmissionListResponse = PaginatedResponse<SubmissionView>;

/// 提交视图（列表/详情响应）
///
/// percentage / grade 为查询时派生字段，只在已评分且有评分上限时出现。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionView {
    pub id: i64,
    pub student: UserBrief,
    pub kind: WorkItemKind,
    pub item_id: i64,
    pub item_title: String,
    pub subject: SubjectBrief,
    pub submitted_at: DateTime<Utc>,
    pub is_evaluated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obtained_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl SubmissionView {
    pub fn from_submission(
        submission: Submission,
        item: &WorkItem,
        student: UserBrief,
        subject: SubjectBrief,
    ) -> Self {
        let total_marks = item.detail.grading_ceiling();
        let percentage = match (submission.is_evaluated, submission.obtained_marks, total_marks) {
            (true, Some(obtained), Some(total)) if total > 0 => {
                Some(grading::percentage(obtained, total))
            }
            _ => None,
        };
        let grade = percentage.map(|p| grading::letter_grade(p).to_string());

        Self {
            id: submission.id,
            student,
            kind: submission.item.kind(),
            item_id: submission.item.item_id(),
            item_title: item.title.clone(),
            subject,
            submitted_at: submission.submitted_at,
            is_evaluated: submission.is_evaluated,
            obtained_marks: submission.obtained_marks,
            total_marks,
            percentage,
            grade,
            file_url: submission.file_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::ItemRef;
    use crate::models::work_items::WorkItemDetail;

    fn quiz_item(total_marks: i32) -> WorkItem {
        WorkItem {
            id: 5,
            title: "单元小测".to_string(),
            subject_id: 1,
            teacher_id: 2,
            section_id: Some(3),
            detail: WorkItemDetail::Quiz { total_marks },
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn submission(is_evaluated: bool, obtained_marks: Option<i32>) -> Submission {
        Submission {
            id: 1,
            student_id: 10,
            item: ItemRef::Quiz(5),
            submitted_at: Utc::now(),
            is_evaluated,
            obtained_marks,
            file_url: None,
        }
    }

    fn briefs() -> (UserBrief, SubjectBrief) {
        (
            UserBrief {
                id: 10,
                username: "stu01".to_string(),
                email: "stu01@example.com".to_string(),
            },
            SubjectBrief {
                id: 1,
                name: "数学".to_string(),
                code: "MATH101".to_string(),
            },
        )
    }

    #[test]
    fn test_unevaluated_hides_percentage_and_grade() {
        let (student, subject) = briefs();
        let view =
            SubmissionView::from_submission(submission(false, None), &quiz_item(60), student, subject);
        assert!(view.percentage.is_none());
        assert!(view.grade.is_none());
        assert_eq!(view.total_marks, Some(60));
    }

    #[test]
    fn test_evaluated_derives_percentage_and_grade() {
        let (student, subject) = briefs();
        let view = SubmissionView::from_submission(
            submission(true, Some(42)),
            &quiz_item(60),
            student,
            subject,
        );
        assert_eq!(view.percentage, Some(70.0));
        assert_eq!(view.grade.as_deref(), Some("B+"));
    }
}
