use uuid::Uuid;

use hearth_domain::pagination::PageRequest;
use hearth_giving::domain::types::{DonationFilter, DonationType};
use hearth_giving::error::GivingError;
use hearth_giving::usecase::donation::{
    CreateDonationUseCase, DeleteDonationUseCase, DonationInput, GetDonationUseCase,
    ListDonationsUseCase, UpdateDonationUseCase,
};

use crate::helpers::{
    MockDonationRepo, MockOrganizationRepo, date, dec, tenant, test_donation, test_organization,
};

fn input(organization_id: Uuid, amount: &str) -> DonationInput {
    DonationInput {
        organization_id,
        amount: dec(amount),
        donation_date: date(2024, 12, 15),
        donation_type: DonationType::CreditCard,
        receipt_number: Some("RC-2024-0042".to_owned()),
        is_tax_deductible: true,
        notes: None,
    }
}

#[tokio::test]
async fn should_record_donation_for_known_organization() {
    let tenant_id = tenant();
    let organization = test_organization(tenant_id, "American Red Cross");
    let donations = MockDonationRepo::empty();
    let events = donations.events_handle();
    let usecase = CreateDonationUseCase {
        organizations: MockOrganizationRepo::new(vec![organization.clone()]),
        donations,
    };

    let donation = usecase
        .execute(tenant_id, input(organization.id, "250.005"))
        .await
        .unwrap();

    assert_eq!(donation.amount, dec("250.01"));
    assert!(donation.donation_type.is_cash());
    let events = events.lock().unwrap();
    assert_eq!(events[0].kind, "donation.saved");
    assert_eq!(events[0].payload["donation_type"], "credit_card");
}

#[tokio::test]
async fn should_reject_zero_amount() {
    let tenant_id = tenant();
    let organization = test_organization(tenant_id, "American Red Cross");
    let usecase = CreateDonationUseCase {
        organizations: MockOrganizationRepo::new(vec![organization.clone()]),
        donations: MockDonationRepo::empty(),
    };

    let result = usecase.execute(tenant_id, input(organization.id, "0")).await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
}

#[tokio::test]
async fn should_reject_amount_that_rounds_to_zero_cents() {
    let tenant_id = tenant();
    let organization = test_organization(tenant_id, "American Red Cross");
    let donations = MockDonationRepo::empty();
    let stored = donations.donations_handle();
    let usecase = CreateDonationUseCase {
        organizations: MockOrganizationRepo::new(vec![organization.clone()]),
        donations,
    };

    let result = usecase.execute(tenant_id, input(organization.id, "0.004")).await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_amount_wider_than_the_column() {
    let tenant_id = tenant();
    let organization = test_organization(tenant_id, "American Red Cross");
    let usecase = CreateDonationUseCase {
        organizations: MockOrganizationRepo::new(vec![organization.clone()]),
        donations: MockDonationRepo::empty(),
    };

    let result = usecase
        .execute(tenant_id, input(organization.id, "10000000000000000"))
        .await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
}

#[tokio::test]
async fn should_reject_unknown_organization() {
    let usecase = CreateDonationUseCase {
        organizations: MockOrganizationRepo::empty(),
        donations: MockDonationRepo::empty(),
    };

    let result = usecase.execute(tenant(), input(Uuid::new_v4(), "10")).await;

    assert!(matches!(result, Err(GivingError::OrganizationNotFound)));
}

#[tokio::test]
async fn should_filter_by_organization_and_year() {
    let tenant_id = tenant();
    let red_cross = test_organization(tenant_id, "American Red Cross");
    let food_bank = test_organization(tenant_id, "Local Food Bank");
    let early = test_donation(&red_cross, "100", date(2024, 1, 10), DonationType::Cash);
    let late = test_donation(&red_cross, "200", date(2024, 12, 20), DonationType::Check);
    let last_year = test_donation(&red_cross, "300", date(2023, 6, 1), DonationType::Cash);
    let groceries = test_donation(&food_bank, "40", date(2024, 11, 1), DonationType::Goods);
    let usecase = ListDonationsUseCase {
        repo: MockDonationRepo::new(vec![
            early.clone(),
            last_year.clone(),
            groceries.clone(),
            late.clone(),
        ]),
    };

    let in_2024 = usecase
        .execute(
            tenant_id,
            DonationFilter {
                organization_id: None,
                year: Some(2024),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    let red_cross_2024 = usecase
        .execute(
            tenant_id,
            DonationFilter {
                organization_id: Some(red_cross.id),
                year: Some(2024),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        in_2024.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![late.id, groceries.id, early.id]
    );
    assert_eq!(
        red_cross_2024.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![late.id, early.id]
    );
}

#[tokio::test]
async fn should_reject_out_of_range_year_filter() {
    let usecase = ListDonationsUseCase {
        repo: MockDonationRepo::empty(),
    };

    let result = usecase
        .execute(
            tenant(),
            DonationFilter {
                organization_id: None,
                year: Some(1850),
            },
            PageRequest::default(),
        )
        .await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
}

#[tokio::test]
async fn should_move_donation_only_to_existing_organization() {
    let tenant_id = tenant();
    let red_cross = test_organization(tenant_id, "American Red Cross");
    let unicef = test_organization(tenant_id, "UNICEF");
    let donation = test_donation(&red_cross, "75", date(2024, 3, 3), DonationType::Cash);
    let usecase = UpdateDonationUseCase {
        organizations: MockOrganizationRepo::new(vec![red_cross, unicef.clone()]),
        donations: MockDonationRepo::new(vec![donation.clone()]),
    };

    let moved = usecase
        .execute(tenant_id, donation.id, input(unicef.id, "80"))
        .await
        .unwrap();
    let lost = usecase
        .execute(tenant_id, donation.id, input(Uuid::new_v4(), "80"))
        .await;

    assert_eq!(moved.organization_id, unicef.id);
    assert_eq!(moved.amount, dec("80"));
    assert!(matches!(lost, Err(GivingError::OrganizationNotFound)));
}

#[tokio::test]
async fn should_hide_other_tenants_donation() {
    let organization = test_organization(tenant(), "UNICEF");
    let donation = test_donation(&organization, "75", date(2024, 3, 3), DonationType::Cash);
    let repo = MockDonationRepo::new(vec![donation.clone()]);

    let get = GetDonationUseCase {
        repo: MockDonationRepo::new(vec![donation.clone()]),
    }
    .execute(tenant(), donation.id)
    .await;
    let delete = DeleteDonationUseCase { repo }.execute(tenant(), donation.id).await;

    assert!(matches!(get, Err(GivingError::DonationNotFound)));
    assert!(matches!(delete, Err(GivingError::DonationNotFound)));
}
