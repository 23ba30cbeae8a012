//! Repository layer - Data access via SeaORM
//!
//! Repositories hide SeaORM behind traits so services stay mockable. The
//! registration writes go through their own seam (see [`registration`]) so
//! the whole flow can run inside one transaction.

pub mod entities;
mod picture_store;
mod profile_store;
mod registration;
mod role_store;
mod user_store;

pub use picture_store::{PictureRepository, PictureStore};
pub use profile_store::{ProfileRepository, ProfileStore};
pub use registration::{NewProviderRow, NewUserRow, RegistrationStore};
pub use role_store::{RoleRepository, RoleStore};
pub use user_store::{UserRepository, UserStore};
