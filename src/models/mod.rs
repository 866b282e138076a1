//! Sample resources served by the binary. Table DDL lives in `schema.sql`.

mod product;
mod store;
mod user;

pub use product::Product;
pub use store::Store;
pub use user::User;

use crate::error::ConfigError;
use crate::registry::Registry;

/// Register every sample resource.
pub fn register_domains(registry: Registry) -> Result<Registry, ConfigError> {
    registry
        .register::<User>("user")?
        .register::<Product>("product")?
        .register::<Store>("store")
}
