use serde::{Deserialize, Serialize};

use crate::db::types::TestStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Group {
    pub(crate) group_id: String,
    pub(crate) group_name: String,
    pub(crate) group_desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Test {
    pub(crate) test_id: String,
    pub(crate) exam: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) student: Option<String>,
    pub(crate) status: TestStatus,
    pub(crate) created_at: String,
}
