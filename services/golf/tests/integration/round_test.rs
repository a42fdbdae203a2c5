use uuid::Uuid;

use hearth_domain::pagination::PageRequest;
use hearth_golf::error::GolfError;
use hearth_golf::usecase::round::{
    CreateRoundInput, CreateRoundUseCase, DeleteRoundUseCase, GetScorecardUseCase,
    ListRoundsUseCase, UpdateRoundInput, UpdateRoundUseCase,
};

use crate::helpers::{
    MockCourseRepo, MockRoundRepo, date, owner, test_course, test_hole, test_round,
};

#[tokio::test]
async fn should_start_round_at_course_par() {
    let (tenant_id, user_id) = owner();
    let course = test_course(tenant_id, "Pine Valley", 18, 70);
    let rounds = MockRoundRepo::empty();
    let events = rounds.events_handle();
    let usecase = CreateRoundUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        rounds,
    };

    let round = usecase
        .execute(
            tenant_id,
            user_id,
            CreateRoundInput {
                course_id: course.id,
                played_date: date(2026, 5, 2),
                total_score: Some(82),
                weather: Some("Sunny, light breeze".to_owned()),
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(round.total_par, 70);
    assert_eq!(round.score_to_par(), 12);
    assert_eq!(events.lock().unwrap()[0].kind, "round.saved");
}

#[tokio::test]
async fn should_not_start_round_on_unknown_course() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateRoundUseCase {
        courses: MockCourseRepo::empty(),
        rounds: MockRoundRepo::empty(),
    };

    let result = usecase
        .execute(
            tenant_id,
            user_id,
            CreateRoundInput {
                course_id: Uuid::new_v4(),
                played_date: date(2026, 5, 2),
                total_score: None,
                weather: None,
                notes: None,
            },
        )
        .await;

    assert!(matches!(result, Err(GolfError::CourseNotFound)));
}

#[tokio::test]
async fn should_list_latest_round_first_and_filter_by_course() {
    let (tenant_id, user_id) = owner();
    let pebble = test_course(tenant_id, "Pebble Beach", 18, 72);
    let augusta = test_course(tenant_id, "Augusta", 18, 72);
    let older = test_round(&pebble, user_id, date(2026, 4, 1));
    let newer = test_round(&pebble, user_id, date(2026, 4, 20));
    let elsewhere = test_round(&augusta, user_id, date(2026, 4, 10));
    let usecase = ListRoundsUseCase {
        repo: MockRoundRepo::new(vec![older.clone(), elsewhere.clone(), newer.clone()], vec![]),
    };

    let all = usecase
        .execute(tenant_id, user_id, None, PageRequest::default())
        .await
        .unwrap();
    let at_pebble = usecase
        .execute(tenant_id, user_id, Some(pebble.id), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(
        all.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![newer.id, elsewhere.id, older.id]
    );
    assert_eq!(
        at_pebble.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );
}

#[tokio::test]
async fn should_hide_other_golfers_rounds() {
    let (tenant_id, user_id) = owner();
    let (_, someone_else) = owner();
    let course = test_course(tenant_id, "Pebble Beach", 18, 72);
    let theirs = test_round(&course, someone_else, date(2026, 4, 1));
    let usecase = GetScorecardUseCase {
        courses: MockCourseRepo::new(vec![course]),
        rounds: MockRoundRepo::new(vec![theirs.clone()], vec![]),
    };

    let result = usecase.execute(tenant_id, user_id, theirs.id).await;

    assert!(matches!(result, Err(GolfError::RoundNotFound)));
}

#[tokio::test]
async fn should_build_scorecard_with_holes_in_order() {
    let (tenant_id, user_id) = owner();
    let course = test_course(tenant_id, "Pebble Beach", 18, 72);
    let round = test_round(&course, user_id, date(2026, 4, 1));
    let holes = vec![
        test_hole(&round, 2, 3, 3),
        test_hole(&round, 1, 4, 5),
    ];
    let usecase = GetScorecardUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        rounds: MockRoundRepo::new(vec![round.clone()], holes),
    };

    let card = usecase.execute(tenant_id, user_id, round.id).await.unwrap();

    assert_eq!(card.course.name, "Pebble Beach");
    assert_eq!(
        card.holes.iter().map(|h| h.hole_number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(card.stats.total_score, 8);
    assert_eq!(card.stats.total_putts, 4);
}

#[tokio::test]
async fn should_update_round_details_without_touching_totals() {
    let (tenant_id, user_id) = owner();
    let course = test_course(tenant_id, "Pebble Beach", 18, 72);
    let mut round = test_round(&course, user_id, date(2026, 4, 1));
    round.total_score = 80;
    let usecase = UpdateRoundUseCase {
        repo: MockRoundRepo::new(vec![round.clone()], vec![]),
    };

    let updated = usecase
        .execute(
            tenant_id,
            user_id,
            round.id,
            UpdateRoundInput {
                played_date: date(2026, 4, 2),
                weather: Some("Overcast".to_owned()),
                notes: Some("Struggled with putting".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.played_date, date(2026, 4, 2));
    assert_eq!(updated.total_score, 80);
    assert_eq!(updated.weather.as_deref(), Some("Overcast"));
}

#[tokio::test]
async fn should_delete_round_with_its_holes() {
    let (tenant_id, user_id) = owner();
    let course = test_course(tenant_id, "Pebble Beach", 18, 72);
    let round = test_round(&course, user_id, date(2026, 4, 1));
    let repo = MockRoundRepo::new(vec![round.clone()], vec![test_hole(&round, 1, 4, 4)]);
    let holes = repo.holes_handle();
    let usecase = DeleteRoundUseCase { repo };

    usecase.execute(tenant_id, user_id, round.id).await.unwrap();

    assert!(holes.lock().unwrap().is_empty());
    let again = usecase.execute(tenant_id, user_id, round.id).await;
    assert!(matches!(again, Err(GolfError::RoundNotFound)));
}
