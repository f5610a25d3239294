//! Use cases: verify the lock, provision the environment, launch the bot.

pub mod launch;
pub mod provision;
pub mod verify_lock;
