//! In-memory storage engine for Pinboard.
//!
//! Three collections (users, assets, favourites) each sit behind their own
//! [`std::sync::RwLock`]. Operations that span collections acquire every lock
//! they touch in the fixed order users → assets → favourites, and no guard
//! ever leaves this crate: reads hand back owned copies.

mod assets;
mod favourites;
mod ids;
mod lock;
mod seed;
mod store;
mod users;

pub use ids::IdAllocator;
pub use seed::seed;
pub use store::MemoryStore;
