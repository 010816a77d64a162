pub(crate) mod models;
pub(crate) mod types;
pub(crate) mod world_state;

use crate::core::config::Settings;
use crate::db::models::{Group, Test};
use crate::db::world_state::WorldState;

/// Both world states backing the ledger controller.
#[derive(Clone)]
pub(crate) struct Ledger {
    groups: WorldState<Group>,
    tests: WorldState<Test>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self { groups: WorldState::new(), tests: WorldState::new() }
    }

    pub(crate) fn groups(&self) -> &WorldState<Group> {
        &self.groups
    }

    pub(crate) fn tests(&self) -> &WorldState<Test> {
        &self.tests
    }
}

pub(crate) async fn init_ledger(settings: &Settings) -> Ledger {
    let ledger = Ledger::new();
    if settings.ledger().seed {
        seed(&ledger).await;
    }
    ledger
}

pub(crate) async fn seed(ledger: &Ledger) {
    let groups = [
        Group {
            group_id: "001".to_string(),
            group_name: "AC17".to_string(),
            group_desc: "Description for AB17".to_string(),
        },
        Group {
            group_id: "002".to_string(),
            group_name: "AC18".to_string(),
            group_desc: "Description for AB18".to_string(),
        },
    ];

    for (index, group) in groups.into_iter().enumerate() {
        let key = (index + 1).to_string();
        tracing::info!(key = %key, group_name = %group.group_name, "seeding group");
        ledger.groups().put_state(key, group).await;
    }
}
