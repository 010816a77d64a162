pub(crate) mod groups;
pub(crate) mod test_records;
