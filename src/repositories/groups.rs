use crate::db::models::Group;
use crate::db::Ledger;

/// Key window scanned when listing groups.
pub(crate) const GROUP_RANGE_START: &str = "0";
pub(crate) const GROUP_RANGE_END: &str = "9999";

pub(crate) struct CreateGroup<'a> {
    pub(crate) group_name: &'a str,
    pub(crate) group_desc: &'a str,
}

pub(crate) async fn list(ledger: &Ledger) -> Vec<(String, Group)> {
    ledger.groups().range(GROUP_RANGE_START, GROUP_RANGE_END).await
}

pub(crate) async fn find_by_key(ledger: &Ledger, key: &str) -> Option<Group> {
    ledger.groups().get_state(key).await
}

/// Stores a group under the next free key; `groupId` is that key padded to three digits.
pub(crate) async fn create(ledger: &Ledger, params: CreateGroup<'_>) -> (String, Group) {
    ledger
        .groups()
        .insert_next(|key| Group {
            group_id: format!("{key:0>3}"),
            group_name: params.group_name.to_string(),
            group_desc: params.group_desc.to_string(),
        })
        .await
}
