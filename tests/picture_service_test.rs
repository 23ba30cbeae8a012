//! Profile picture service tests: payload validation, the account
//! existence guard, and the placeholder fallback.

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;
use uuid::Uuid;

use apex_vendor::config::PLACEHOLDER_PICTURE_PATH;
use apex_vendor::domain::{AdminProfile, ProviderListing, ProviderProfile, User};
use apex_vendor::errors::{AppError, AppResult};
use apex_vendor::infra::{
    PictureRepository, ProfileRepository, RoleRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use apex_vendor::services::{PictureManager, PictureService, StoredPicture};
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

struct TestUnitOfWork {
    users: Arc<MockUserRepo>,
    pictures: Arc<MockPictureRepo>,
    profiles: Arc<MockProfileRepo>,
    roles: Arc<MockRoleRepo>,
}

impl TestUnitOfWork {
    fn new(users: MockUserRepo, pictures: MockPictureRepo) -> Self {
        Self {
            users: Arc::new(users),
            pictures: Arc::new(pictures),
            profiles: Arc::new(MockProfileRepo::new()),
            roles: Arc::new(MockRoleRepo::new()),
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

fn sample_user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "hash".to_string(),
        account_status: "activo".to_string(),
        instagram: None,
        linkedin: None,
        website: None,
        github: None,
        created_at: chrono::Utc::now(),
    }
}

// "hello" in standard base64
const VALID_PAYLOAD: &str = "aGVsbG8=";

#[tokio::test]
async fn store_upserts_for_an_existing_account() {
    let mut users = MockUserRepo::new();
    users
        .expect_find_by_username()
        .with(eq("p-maria-9f86d081"))
        .returning(|u| Ok(Some(sample_user(u))));

    let mut pictures = MockPictureRepo::new();
    pictures
        .expect_upsert()
        .with(eq("p-maria-9f86d081"), eq(VALID_PAYLOAD))
        .times(1)
        .returning(|_, _| Ok(()));

    let service = PictureManager::new(Arc::new(TestUnitOfWork::new(users, pictures)));
    service.store("p-maria-9f86d081", VALID_PAYLOAD).await.unwrap();
}

#[tokio::test]
async fn store_rejects_an_empty_payload() {
    let service = PictureManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepo::new(),
        MockPictureRepo::new(),
    )));

    let result = service.store("anyone", "").await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn store_rejects_malformed_base64() {
    let service = PictureManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepo::new(),
        MockPictureRepo::new(),
    )));

    let result = service.store("anyone", "not base64!!").await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn store_requires_an_existing_account() {
    let mut users = MockUserRepo::new();
    users.expect_find_by_username().returning(|_| Ok(None));

    let service = PictureManager::new(Arc::new(TestUnitOfWork::new(
        users,
        MockPictureRepo::new(),
    )));

    let result = service.store("ghost", VALID_PAYLOAD).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn fetch_returns_the_uploaded_payload() {
    let mut pictures = MockPictureRepo::new();
    pictures
        .expect_fetch()
        .with(eq("p-maria-9f86d081"))
        .returning(|_| Ok(Some(VALID_PAYLOAD.to_string())));

    let service = PictureManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepo::new(),
        pictures,
    )));

    let picture = service.fetch("p-maria-9f86d081").await.unwrap();
    assert_eq!(picture, StoredPicture::Uploaded(VALID_PAYLOAD.to_string()));
}

#[tokio::test]
async fn fetch_falls_back_to_the_placeholder() {
    let mut pictures = MockPictureRepo::new();
    pictures.expect_fetch().returning(|_| Ok(None));

    let service = PictureManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepo::new(),
        pictures,
    )));

    let picture = service.fetch("newuser").await.unwrap();
    assert_eq!(picture, StoredPicture::Placeholder(PLACEHOLDER_PICTURE_PATH));
}
