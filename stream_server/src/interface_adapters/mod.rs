// Interface adapters: HTTP handlers, wire DTOs, shared state, and the
// GameLift Streams client.

pub mod clients;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
