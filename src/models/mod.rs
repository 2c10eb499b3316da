mod account;
mod commodity;
mod holding;
mod id;
mod owner;
mod price;

pub use account::Account;
pub use commodity::Commodity;
pub use holding::{Holding, PositionKey};
pub use id::{Id, IdError};
pub use owner::Owner;
pub use price::Price;
