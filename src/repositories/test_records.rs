use crate::core::time::{format_utc, now_utc};
use crate::db::models::Test;
use crate::db::types::TestStatus;
use crate::db::Ledger;

pub(crate) async fn list(ledger: &Ledger) -> Vec<(String, Test)> {
    ledger.tests().scan().await
}

pub(crate) async fn list_for_student(ledger: &Ledger, student: &str) -> Vec<(String, Test)> {
    ledger
        .tests()
        .scan()
        .await
        .into_iter()
        .filter(|(_, test)| test.student.as_deref() == Some(student))
        .collect()
}

pub(crate) async fn find_prepared(ledger: &Ledger, exam: &str) -> Option<Test> {
    ledger
        .tests()
        .scan()
        .await
        .into_iter()
        .map(|(_, test)| test)
        .find(|test| test.status == TestStatus::Prepared && test.exam == exam)
}

/// Returns `None` when the exam already has a prepared test.
pub(crate) async fn create_prepared(ledger: &Ledger, exam: &str) -> Option<(String, Test)> {
    ledger
        .tests()
        .try_insert_next(
            |test| test.status == TestStatus::Prepared && test.exam == exam,
            |key| Test {
                test_id: key.to_string(),
                exam: exam.to_string(),
                student: None,
                status: TestStatus::Prepared,
                created_at: format_utc(now_utc()),
            },
        )
        .await
}

pub(crate) async fn create_taken(ledger: &Ledger, exam: &str, student: &str) -> (String, Test) {
    ledger
        .tests()
        .insert_next(|key| Test {
            test_id: key.to_string(),
            exam: exam.to_string(),
            student: Some(student.to_string()),
            status: TestStatus::Taken,
            created_at: format_utc(now_utc()),
        })
        .await
}
