pub(crate) mod ledger_controller;
