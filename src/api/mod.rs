pub(crate) mod controller;
pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod router;
pub(crate) mod routes;
