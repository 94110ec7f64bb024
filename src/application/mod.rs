//! Application layer: services orchestrating the domain ports.
//!
//! Each service owns boxed ports and takes an explicit `RequestContext` per
//! call; nothing here reads ambient state. Suspension only happens at
//! awaited port calls and no operation spawns work that outlives the call.

pub mod documents;
pub mod onboarding;
pub mod subscriptions;
pub mod transfers;
pub mod webhook;
