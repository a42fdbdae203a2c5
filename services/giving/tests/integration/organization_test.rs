use hearth_domain::pagination::PageRequest;
use hearth_giving::domain::types::DonationType;
use hearth_giving::error::GivingError;
use hearth_giving::usecase::organization::{
    CreateOrganizationUseCase, DeleteOrganizationUseCase, ListOrganizationsUseCase,
    OrganizationInput, UpdateOrganizationUseCase,
};

use crate::helpers::{
    MockDonationRepo, MockOrganizationRepo, date, tenant, test_donation, test_organization,
};

fn input(name: &str) -> OrganizationInput {
    OrganizationInput {
        name: name.to_owned(),
        ein: Some("13-1644147".to_owned()),
        address: Some("  431 18th St NW, Washington, DC  ".to_owned()),
        website: None,
        is_501c3: true,
        notes: Some("   ".to_owned()),
    }
}

#[tokio::test]
async fn should_create_organization_with_trimmed_fields() {
    let tenant_id = tenant();
    let repo = MockOrganizationRepo::empty();
    let events = repo.events_handle();
    let usecase = CreateOrganizationUseCase { repo };

    let organization = usecase
        .execute(tenant_id, input("American Red Cross"))
        .await
        .unwrap();

    assert_eq!(
        organization.address.as_deref(),
        Some("431 18th St NW, Washington, DC")
    );
    assert_eq!(organization.notes, None);
    let events = events.lock().unwrap();
    assert_eq!(events[0].kind, "organization.saved");
    assert_eq!(events[0].payload["created"], true);
}

#[tokio::test]
async fn should_reject_blank_name() {
    let usecase = CreateOrganizationUseCase {
        repo: MockOrganizationRepo::empty(),
    };

    let result = usecase.execute(tenant(), input("  ")).await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
}

#[tokio::test]
async fn should_reject_overlong_ein() {
    let mut bad = input("Doctors Without Borders");
    bad.ein = Some("1".repeat(21));
    let usecase = CreateOrganizationUseCase {
        repo: MockOrganizationRepo::empty(),
    };

    let result = usecase.execute(tenant(), bad).await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
}

#[tokio::test]
async fn should_list_only_own_tenant_by_name() {
    let tenant_id = tenant();
    let unicef = test_organization(tenant_id, "UNICEF");
    let habitat = test_organization(tenant_id, "Habitat for Humanity");
    let foreign = test_organization(tenant(), "Oxfam");
    let usecase = ListOrganizationsUseCase {
        repo: MockOrganizationRepo::new(vec![unicef.clone(), foreign, habitat.clone()]),
    };

    let organizations = usecase
        .execute(tenant_id, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(
        organizations.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![habitat.id, unicef.id]
    );
}

#[tokio::test]
async fn should_not_update_other_tenants_organization() {
    let organization = test_organization(tenant(), "UNICEF");
    let usecase = UpdateOrganizationUseCase {
        repo: MockOrganizationRepo::new(vec![organization.clone()]),
    };

    let result = usecase
        .execute(tenant(), organization.id, input("UNICEF USA"))
        .await;

    assert!(matches!(result, Err(GivingError::OrganizationNotFound)));
}

#[tokio::test]
async fn should_refuse_delete_while_donations_remain() {
    let tenant_id = tenant();
    let organization = test_organization(tenant_id, "Local Food Bank");
    let donations = MockDonationRepo::new(vec![test_donation(
        &organization,
        "50.00",
        date(2024, 11, 28),
        DonationType::Goods,
    )]);
    let repo = MockOrganizationRepo::new(vec![organization.clone()]).sharing(&donations);
    let stored = repo.organizations_handle();
    let usecase = DeleteOrganizationUseCase { repo };

    let result = usecase.execute(tenant_id, organization.id).await;

    assert!(matches!(result, Err(GivingError::OrganizationHasDonations)));
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_delete_organization_without_donations() {
    let tenant_id = tenant();
    let organization = test_organization(tenant_id, "Local Food Bank");
    let repo = MockOrganizationRepo::new(vec![organization.clone()]);
    let events = repo.events_handle();
    let usecase = DeleteOrganizationUseCase { repo };

    usecase.execute(tenant_id, organization.id).await.unwrap();
    let again = usecase.execute(tenant_id, organization.id).await;

    assert!(matches!(again, Err(GivingError::OrganizationNotFound)));
    assert_eq!(events.lock().unwrap()[0].kind, "organization.deleted");
}
