//! Profile service tests: resolver precedence, field-map routing, and the
//! provider listing, with repositories mocked at the Unit of Work seams.

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;
use uuid::Uuid;

use apex_vendor::domain::{AdminProfile, ProviderListing, ProviderProfile, User};
use apex_vendor::errors::{AppError, AppResult};
use apex_vendor::infra::{
    PictureRepository, ProfileRepository, RoleRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use apex_vendor::services::{ProfileManager, ProfileService};
use apex_vendor::types::PaginationParams;

mock! {
    UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn update_column(&self, username: &str, column: &str, value: &str) -> AppResult<()>;
        async fn delete(&self, id: Uuid) -> AppResult<()>;
    }
}

mock! {
    ProfileRepo {}

    #[async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn provider_by_user(&self, user_id: Uuid) -> AppResult<Option<ProviderProfile>>;
        async fn admin_by_user(&self, user_id: Uuid) -> AppResult<Option<AdminProfile>>;
        async fn update_provider_column(
            &self,
            user_id: Uuid,
            column: &str,
            value: &str,
        ) -> AppResult<()>;
        async fn list_providers(
            &self,
            params: &PaginationParams,
        ) -> AppResult<(Vec<ProviderListing>, u64)>;
    }
}

mock! {
    RoleRepo {}

    #[async_trait]
    impl RoleRepository for RoleRepo {
        async fn role_names_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>>;
    }
}

mock! {
    PictureRepo {}

    #[async_trait]
    impl PictureRepository for PictureRepo {
        async fn upsert(&self, username: &str, image_base64: &str) -> AppResult<()>;
        async fn fetch(&self, username: &str) -> AppResult<Option<String>>;
    }
}

/// Unit of Work double wrapping the repository mocks. The generic
/// transaction method is not mockable; nothing under test here uses it.
struct TestUnitOfWork {
    users: Arc<MockUserRepo>,
    profiles: Arc<MockProfileRepo>,
    roles: Arc<MockRoleRepo>,
    pictures: Arc<MockPictureRepo>,
}

impl TestUnitOfWork {
    fn new(users: MockUserRepo, profiles: MockProfileRepo) -> Self {
        Self {
            users: Arc::new(users),
            profiles: Arc::new(profiles),
            roles: Arc::new(MockRoleRepo::new()),
            pictures: Arc::new(MockPictureRepo::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }

    fn pictures(&self) -> Arc<dyn PictureRepository> {
        self.pictures.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn sample_user(id: Uuid, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "hash".to_string(),
        account_status: "activo".to_string(),
        instagram: Some("@maria".to_string()),
        linkedin: None,
        website: None,
        github: None,
        created_at: chrono::Utc::now(),
    }
}

fn sample_provider(user_id: Uuid) -> ProviderProfile {
    ProviderProfile {
        user_id,
        provider_type: "Persona".to_string(),
        tax_id: "900123456".to_string(),
        legal_name: None,
        full_name: Some("Maria Lopez".to_string()),
        phone: Some("3001234567".to_string()),
        address: None,
        city: Some("Bogota".to_string()),
        portfolio_summary: None,
        score: 12,
    }
}

#[tokio::test]
async fn resolve_prefers_the_provider_profile() {
    let uid = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .with(eq("p-maria-9f86d081"))
        .returning(move |_| Ok(Some(sample_user(uid, "p-maria-9f86d081"))));

    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_provider_by_user()
        .with(eq(uid))
        .returning(move |_| Ok(Some(sample_provider(uid))));
    // admin_by_user must not be consulted when a provider profile exists

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(users, profiles)));
    let view = service.resolve("p-maria-9f86d081").await.unwrap();

    assert_eq!(view.username, "p-maria-9f86d081");
    assert_eq!(view.display_name, "Maria");
    assert_eq!(view.instagram, "@maria");
    assert_eq!(view.profile.full_name, "Maria Lopez");
    assert_eq!(view.profile.tax_id, "900123456");
    assert_eq!(view.profile.city, "Bogota");
    assert_eq!(view.profile.score, 12);
}

#[tokio::test]
async fn resolving_twice_without_writes_yields_identical_views() {
    let uid = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .with(eq("p-maria-9f86d081"))
        .times(2)
        .returning(move |u| {
            let mut user = sample_user(uid, u);
            user.created_at = chrono::DateTime::UNIX_EPOCH;
            Ok(Some(user))
        });

    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_provider_by_user()
        .with(eq(uid))
        .times(2)
        .returning(move |_| Ok(Some(sample_provider(uid))));

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(users, profiles)));
    let first = service.resolve("p-maria-9f86d081").await.unwrap();
    let second = service.resolve("p-maria-9f86d081").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn resolve_falls_back_to_the_admin_profile() {
    let uid = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .returning(move |_| Ok(Some(sample_user(uid, "a-juan-abc12345"))));

    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_provider_by_user()
        .with(eq(uid))
        .returning(|_| Ok(None));
    profiles
        .expect_admin_by_user()
        .with(eq(uid))
        .returning(move |_| {
            Ok(Some(AdminProfile {
                user_id: uid,
                name: Some("Juan".to_string()),
            }))
        });

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(users, profiles)));
    let view = service.resolve("a-juan-abc12345").await.unwrap();

    assert_eq!(view.profile.full_name, "Juan");
    assert_eq!(view.profile.tax_id, "");
    assert_eq!(view.profile.score, 0);
}

#[tokio::test]
async fn user_without_any_profile_resolves_with_zero_values() {
    let uid = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .returning(move |_| Ok(Some(sample_user(uid, "plainuser"))));

    let mut profiles = MockProfileRepo::new();
    profiles.expect_provider_by_user().returning(|_| Ok(None));
    profiles.expect_admin_by_user().returning(|_| Ok(None));

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(users, profiles)));
    let view = service.resolve("plainuser").await.unwrap();

    assert_eq!(view.profile.full_name, "");
    assert_eq!(view.profile.tax_id, "");
    assert_eq!(view.profile.phone, "");
    assert_eq!(view.profile.score, 0);
}

#[tokio::test]
async fn resolve_unknown_user_is_not_found() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_username().returning(|_| Ok(None));

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(
        users,
        MockProfileRepo::new(),
    )));
    let result = service.resolve("ghost").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn account_field_update_routes_to_the_user_table() {
    let mut users = MockUserRepo::new();
    users
        .expect_update_column()
        .with(eq("p-maria-9f86d081"), eq("correo"), eq("new@example.com"))
        .times(1)
        .returning(|_, _, _| Ok(()));

    // No profile repository expectations: the update must not touch it
    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(
        users,
        MockProfileRepo::new(),
    )));

    service
        .update_field("p-maria-9f86d081", "correo", "new@example.com")
        .await
        .unwrap();
}

#[tokio::test]
async fn provider_field_update_routes_to_the_profile_table() {
    let uid = Uuid::new_v4();
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .returning(move |_| Ok(Some(sample_user(uid, "p-maria-9f86d081"))));

    let mut profiles = MockProfileRepo::new();
    profiles
        .expect_update_provider_column()
        .with(eq(uid), eq("ciudad"), eq("Cali"))
        .times(1)
        .returning(|_, _, _| Ok(()));

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(users, profiles)));
    service
        .update_field("p-maria-9f86d081", "ciudad", "Cali")
        .await
        .unwrap();
}

#[tokio::test]
async fn unmapped_field_is_rejected_without_touching_storage() {
    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepo::new(),
        MockProfileRepo::new(),
    )));

    for field in ["contrasena_hash", "username", "id_usuario", "score"] {
        let result = service.update_field("anyone", field, "value").await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }
}

#[tokio::test]
async fn provider_listing_carries_pagination_metadata() {
    let mut profiles = MockProfileRepo::new();
    profiles.expect_list_providers().returning(|params| {
        assert_eq!(params.page, 2);
        let listings = vec![ProviderListing {
            username: "p-maria-9f86d081".to_string(),
            email: "maria@example.com".to_string(),
            account_status: "activo".to_string(),
            full_name: "Maria Lopez".to_string(),
            tax_id: "900123456".to_string(),
            city: "Bogota".to_string(),
            provider_type: "Persona".to_string(),
            score: 12,
        }];
        Ok((listings, 41))
    });

    let service = ProfileManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepo::new(),
        profiles,
    )));

    let page = service
        .list_providers(PaginationParams {
            page: 2,
            per_page: 20,
        })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.per_page, 20);
    assert_eq!(page.meta.total, 41);
    assert_eq!(page.meta.total_pages, 3);
}
