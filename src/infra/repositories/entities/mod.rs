//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod perfil_admin;
pub mod perfil_proveedor;
pub mod pfp;
pub mod rol;
pub mod usuario;
pub mod usuario_rol;
