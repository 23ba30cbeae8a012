//! Registration orchestration tests.
//!
//! Run the step sequence against an in-memory store with fault injection
//! to check ordering, the single-role-profile guarantee, tax ID synthesis,
//! and that every failure propagates (so the surrounding transaction
//! rolls back).

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use apex_vendor::domain::NewRegistration;
use apex_vendor::errors::{AppError, AppResult};
use apex_vendor::infra::{NewProviderRow, NewUserRow, RegistrationStore};
use apex_vendor::services::execute_registration;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FailAt {
    InsertUser,
    InsertProfile,
    AssignRole,
}

/// In-memory registration store. Rows are staged exactly as a transaction
/// would stage them; an injected failure surfaces at the matching step.
#[derive(Default)]
struct FakeStore {
    roles: HashMap<String, Uuid>,
    fail_at: Option<FailAt>,
    users: Vec<(Uuid, NewUserRow)>,
    admin_profiles: Vec<(Uuid, Option<String>)>,
    provider_profiles: Vec<(Uuid, NewProviderRow)>,
    assignments: Vec<(Uuid, Uuid)>,
}

impl FakeStore {
    fn with_seeded_roles() -> Self {
        let mut store = Self::default();
        store.roles.insert("Admin".to_string(), Uuid::new_v4());
        store.roles.insert("Proveedor".to_string(), Uuid::new_v4());
        store
    }

    fn failing_at(fail_at: FailAt) -> Self {
        let mut store = Self::with_seeded_roles();
        store.fail_at = Some(fail_at);
        store
    }

    fn profile_count(&self) -> usize {
        self.admin_profiles.len() + self.provider_profiles.len()
    }
}

#[async_trait]
impl RegistrationStore for FakeStore {
    async fn insert_user(&mut self, row: NewUserRow) -> AppResult<Uuid> {
        if self.fail_at == Some(FailAt::InsertUser) {
            return Err(AppError::conflict("User"));
        }
        let id = Uuid::new_v4();
        self.users.push((id, row));
        Ok(id)
    }

    async fn insert_admin_profile(
        &mut self,
        user_id: Uuid,
        name: Option<String>,
    ) -> AppResult<()> {
        if self.fail_at == Some(FailAt::InsertProfile) {
            return Err(AppError::internal("injected profile failure"));
        }
        self.admin_profiles.push((user_id, name));
        Ok(())
    }

    async fn insert_provider_profile(
        &mut self,
        user_id: Uuid,
        row: NewProviderRow,
    ) -> AppResult<()> {
        if self.fail_at == Some(FailAt::InsertProfile) {
            return Err(AppError::conflict("Provider tax ID"));
        }
        self.provider_profiles.push((user_id, row));
        Ok(())
    }

    async fn find_role_id(&mut self, name: &str) -> AppResult<Option<Uuid>> {
        Ok(self.roles.get(name).copied())
    }

    async fn assign_role(&mut self, user_id: Uuid, role_id: Uuid) -> AppResult<()> {
        if self.fail_at == Some(FailAt::AssignRole) {
            return Err(AppError::internal("injected assignment failure"));
        }
        self.assignments.push((user_id, role_id));
        Ok(())
    }
}

fn provider_registration() -> NewRegistration {
    let mut reg = NewRegistration::new(
        "p-maria-9f86d081".to_string(),
        "SecurePass123!".to_string(),
        "maria@example.com".to_string(),
    );
    reg.name = Some("Maria".to_string());
    reg.city = Some("Bogota".to_string());
    reg
}

fn admin_registration() -> NewRegistration {
    let mut reg = NewRegistration::new(
        "a-juan-abc12345".to_string(),
        "SecurePass123!".to_string(),
        "juan@example.com".to_string(),
    );
    reg.name = Some("Juan".to_string());
    reg.is_admin = true;
    reg
}

#[tokio::test]
async fn provider_registration_creates_every_row() {
    let mut store = FakeStore::with_seeded_roles();
    let reg = provider_registration();

    let user_id = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap();

    assert_eq!(store.users.len(), 1);
    assert_eq!(store.users[0].0, user_id);
    assert_eq!(store.users[0].1.account_status, "activo");
    assert_eq!(store.profile_count(), 1);
    assert!(store.admin_profiles.is_empty());

    let proveedor_role = store.roles["Proveedor"];
    assert_eq!(store.assignments, vec![(user_id, proveedor_role)]);
}

#[tokio::test]
async fn missing_tax_id_gets_synthesized_placeholder() {
    let mut store = FakeStore::with_seeded_roles();
    let reg = provider_registration();

    let user_id = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap();

    let (_, profile) = &store.provider_profiles[0];
    assert!(profile.tax_id.starts_with("TEMP-"));
    assert_eq!(profile.tax_id.len(), "TEMP-".len() + 6);
    // Suffix comes from the generated account id
    let simple = user_id.simple().to_string();
    assert!(simple.ends_with(&profile.tax_id["TEMP-".len()..]));
}

#[tokio::test]
async fn explicit_tax_id_is_kept_and_trimmed() {
    let mut store = FakeStore::with_seeded_roles();
    let mut reg = provider_registration();
    reg.tax_id = Some("  900123456-7  ".to_string());

    execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap();

    assert_eq!(store.provider_profiles[0].1.tax_id, "900123456-7");
}

#[tokio::test]
async fn blank_tax_id_counts_as_missing() {
    let mut store = FakeStore::with_seeded_roles();
    let mut reg = provider_registration();
    reg.tax_id = Some("   ".to_string());

    execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap();

    assert!(store.provider_profiles[0].1.tax_id.starts_with("TEMP-"));
}

#[tokio::test]
async fn admin_registration_gets_admin_profile_and_role() {
    let mut store = FakeStore::with_seeded_roles();
    let reg = admin_registration();

    let user_id = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap();

    assert_eq!(store.admin_profiles, vec![(user_id, Some("Juan".to_string()))]);
    assert!(store.provider_profiles.is_empty());

    let admin_role = store.roles["Admin"];
    assert_eq!(store.assignments, vec![(user_id, admin_role)]);
}

#[tokio::test]
async fn missing_role_row_is_a_configuration_error() {
    let mut store = FakeStore::default(); // no seeded roles
    let reg = provider_registration();

    let err = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Configuration(_)));
    // The profile was written before the lookup; the transaction discards it
    assert!(store.assignments.is_empty());
}

#[tokio::test]
async fn user_insert_failure_stops_the_sequence() {
    let mut store = FakeStore::failing_at(FailAt::InsertUser);
    let reg = provider_registration();

    let err = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(store.users.is_empty());
    assert_eq!(store.profile_count(), 0);
    assert!(store.assignments.is_empty());
}

#[tokio::test]
async fn profile_insert_failure_propagates_before_role_assignment() {
    let mut store = FakeStore::failing_at(FailAt::InsertProfile);
    let reg = provider_registration();

    let err = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(store.assignments.is_empty());
}

#[tokio::test]
async fn role_assignment_failure_propagates() {
    let mut store = FakeStore::failing_at(FailAt::AssignRole);
    let reg = admin_registration();

    let err = execute_registration(&mut store, &reg, "hash".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(store.assignments.is_empty());
}
