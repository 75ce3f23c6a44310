mod common;
mod fixture;
mod input;
mod player;
mod scorer;
mod session;
mod team;
mod tournament;
mod zone;

pub use common::*;
pub use fixture::*;
pub use input::*;
pub use player::*;
pub use scorer::*;
pub use session::*;
pub use team::*;
pub use tournament::*;
pub use zone::*;
