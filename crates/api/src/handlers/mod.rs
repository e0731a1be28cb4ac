pub mod admin_events;
pub mod afisha;
pub mod events;
pub mod intickets;
pub mod upload;
