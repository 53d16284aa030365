//! Admin console endpoints. Every handler takes [`AdminUser`](permata_shared::middleware::AdminUser).

pub mod mediators;
pub mod pairing;
pub mod participants;
pub mod stats;
