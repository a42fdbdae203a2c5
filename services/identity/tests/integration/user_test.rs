use uuid::Uuid;

use hearth_domain::id::UserId;
use hearth_identity::domain::types::ValidationError;
use hearth_identity::error::IdentityError;
use hearth_identity::usecase::user::{GetMeUseCase, RegisterUserInput, RegisterUserUseCase};

use crate::helpers::{
    MockRoleRepo, MockStore, MockUserRepo, PlainHasher, ThreadTrackingHasher, tenant,
};

fn register(store: &MockStore) -> RegisterUserUseCase<MockUserRepo, MockRoleRepo, PlainHasher> {
    RegisterUserUseCase {
        users: store.users(),
        roles: store.roles(),
        hasher: PlainHasher,
    }
}

fn input(user_name: &str, email: &str) -> RegisterUserInput {
    RegisterUserInput {
        user_name: user_name.to_owned(),
        email: email.to_owned(),
        password: "s3cretpass".to_owned(),
    }
}

#[tokio::test]
async fn should_make_first_user_admin_and_later_users_plain() {
    let store = MockStore::default();
    let tenant_id = tenant();

    let first = register(&store)
        .execute(tenant_id, input("alice", "alice@example.com"))
        .await
        .unwrap();
    let second = register(&store)
        .execute(tenant_id, input("bob", "bob@example.com"))
        .await
        .unwrap();

    assert_eq!(first.roles, vec!["Admin"]);
    assert_eq!(second.roles, vec!["User"]);
    // default roles are created once per tenant
    assert_eq!(store.0.lock().unwrap().roles.len(), 2);
}

#[tokio::test]
async fn should_count_first_user_per_tenant() {
    let store = MockStore::default();
    register(&store)
        .execute(tenant(), input("alice", "alice@example.com"))
        .await
        .unwrap();

    let other = register(&store)
        .execute(tenant(), input("alice", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(other.roles, vec!["Admin"]);
}

#[tokio::test]
async fn should_hash_password_and_lowercase_email() {
    let store = MockStore::default();
    let profile = register(&store)
        .execute(tenant(), input(" alice ", "Alice@Example.com"))
        .await
        .unwrap();

    assert_eq!(profile.user.user_name, "alice");
    assert_eq!(profile.user.email, "alice@example.com");
    assert_eq!(profile.user.password_hash, "plain:s3cretpass");
}

#[tokio::test]
async fn should_record_user_registered_event() {
    let store = MockStore::default();
    let profile = register(&store)
        .execute(tenant(), input("alice", "alice@example.com"))
        .await
        .unwrap();

    let data = store.0.lock().unwrap();
    assert_eq!(data.events.len(), 1);
    assert_eq!(data.events[0].kind, "user.registered");
    assert_eq!(data.events[0].aggregate_id, profile.user.id.0);
    assert_eq!(data.events[0].payload["role"], "Admin");
}

#[tokio::test]
async fn should_reject_duplicate_user_name_in_same_tenant() {
    let store = MockStore::default();
    let tenant_id = tenant();
    register(&store)
        .execute(tenant_id, input("alice", "alice@example.com"))
        .await
        .unwrap();

    let result = register(&store)
        .execute(tenant_id, input("alice", "other@example.com"))
        .await;

    assert!(matches!(result, Err(IdentityError::UserAlreadyExists)));
}

#[tokio::test]
async fn should_reject_weak_password_before_touching_storage() {
    let store = MockStore::default();
    let mut weak = input("alice", "alice@example.com");
    weak.password = "password".to_owned();

    let result = register(&store).execute(tenant(), weak).await;

    assert!(matches!(
        result,
        Err(IdentityError::InvalidInput(ValidationError::Password))
    ));
    assert!(store.0.lock().unwrap().roles.is_empty());
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let result = register(&MockStore::default())
        .execute(tenant(), input("alice", "alice.example.com"))
        .await;

    assert!(matches!(
        result,
        Err(IdentityError::InvalidInput(ValidationError::Email))
    ));
}

#[tokio::test]
async fn should_return_me_with_role_names() {
    let store = MockStore::default();
    let tenant_id = tenant();
    let user = store.add_user(tenant_id, "carol", "s3cretpass");
    let admin = store.add_role(tenant_id, "Admin");
    let auditor = store.add_role(tenant_id, "Auditor");
    store.grant(&user, &auditor);
    store.grant(&user, &admin);

    let usecase = GetMeUseCase {
        users: store.users(),
        roles: store.roles(),
    };
    let profile = usecase.execute(tenant_id, user.id).await.unwrap();

    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.roles, vec!["Admin", "Auditor"]);
}

#[tokio::test]
async fn should_not_find_me_in_another_tenant() {
    let store = MockStore::default();
    let user = store.add_user(tenant(), "carol", "s3cretpass");

    let usecase = GetMeUseCase {
        users: store.users(),
        roles: store.roles(),
    };
    let result = usecase.execute(tenant(), user.id).await;
    assert!(matches!(result, Err(IdentityError::UserNotFound)));

    let result = usecase.execute(user.tenant_id, UserId(Uuid::new_v4())).await;
    assert!(matches!(result, Err(IdentityError::UserNotFound)));
}

#[tokio::test]
async fn should_hash_password_off_the_request_thread() {
    let store = MockStore::default();
    let hasher = ThreadTrackingHasher::default();
    let threads = hasher.threads.clone();
    let usecase = RegisterUserUseCase {
        users: store.users(),
        roles: store.roles(),
        hasher,
    };

    let profile = usecase
        .execute(tenant(), input("erin", "erin@example.com"))
        .await
        .unwrap();

    let threads = threads.lock().unwrap();
    assert_eq!(threads.len(), 1);
    assert_ne!(threads[0], std::thread::current().id());
    assert_eq!(profile.user.password_hash, "plain:s3cretpass");
}
