//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction lifecycle. Registration is
//! the one multi-table workflow; its writes run through a transaction-bound
//! [`RegistrationStore`] so either every row lands or none do.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{perfil_admin, perfil_proveedor, rol, usuario, usuario_rol};
use super::repositories::{
    NewProviderRow, NewUserRow, PictureRepository, PictureStore, ProfileRepository, ProfileStore,
    RegistrationStore, RoleRepository, RoleStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the repository seams instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn profiles(&self) -> Arc<dyn ProfileRepository>;

    fn roles(&self) -> Arc<dyn RoleRepository>;

    fn pictures(&self) -> Arc<dyn PictureRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level for balanced consistency/performance.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All operations performed through this context are part of the same
/// database transaction. The context borrows the transaction to ensure
/// proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Registration writes bound to this transaction.
    pub fn registration(&self) -> TxRegistrationStore<'_> {
        TxRegistrationStore::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    profile_repo: Arc<ProfileStore>,
    role_repo: Arc<RoleStore>,
    picture_repo: Arc<PictureStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let profile_repo = Arc::new(ProfileStore::new(db.clone()));
        let role_repo = Arc::new(RoleStore::new(db.clone()));
        let picture_repo = Arc::new(PictureStore::new(db.clone()));
        Self {
            db,
            user_repo,
            profile_repo,
            role_repo,
            picture_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }

    fn pictures(&self) -> Arc<dyn PictureRepository> {
        self.picture_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Registration writes executed against a live transaction.
///
/// Uses a borrowed reference so the transaction outlives every statement.
pub struct TxRegistrationStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRegistrationStore<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl RegistrationStore for TxRegistrationStore<'_> {
    async fn insert_user(&mut self, row: NewUserRow) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let active = usuario::ActiveModel {
            id_usuario: Set(id),
            username: Set(row.username),
            correo: Set(row.email),
            contrasena_hash: Set(row.password_hash),
            estado_cuenta: Set(row.account_status),
            instagram: Set(None),
            linkedin: Set(None),
            website: Set(None),
            github: Set(None),
            created_at: Set(chrono::Utc::now()),
        };

        active
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_db("User", e))?;
        Ok(id)
    }

    async fn insert_admin_profile(
        &mut self,
        user_id: Uuid,
        name: Option<String>,
    ) -> AppResult<()> {
        let active = perfil_admin::ActiveModel {
            id_admin: Set(user_id),
            nombre: Set(name),
        };

        active
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_db("Admin profile", e))?;
        Ok(())
    }

    async fn insert_provider_profile(
        &mut self,
        user_id: Uuid,
        row: NewProviderRow,
    ) -> AppResult<()> {
        let active = perfil_proveedor::ActiveModel {
            id_proveedor: Set(user_id),
            tipo_proveedor: Set(row.provider_type),
            identificacion_nit: Set(row.tax_id),
            nombre_legal: Set(row.legal_name),
            nombres_apellidos: Set(row.full_name),
            telefono: Set(row.phone),
            direccion: Set(row.address),
            ciudad: Set(row.city),
            portafolio_resumen: Set(row.portfolio_summary),
            score: Set(0),
        };

        active
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_db("Provider tax ID", e))?;
        Ok(())
    }

    async fn find_role_id(&mut self, name: &str) -> AppResult<Option<Uuid>> {
        let role = rol::Entity::find()
            .filter(rol::Column::Nombre.eq(name))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(role.map(|r| r.id_rol))
    }

    async fn assign_role(&mut self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        let active = usuario_rol::ActiveModel {
            id_usuario: Set(user_id),
            id_rol: Set(role_id),
        };

        active
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
