mod common;

use common::{date, lisbon, lisbon_costs, setup, trip_for};
use engine::{
    CostOverrides, DailyCostSet, EngineError, ExpenseCategory, ExpenseCmd, FREE_TRIP_LIMIT,
    MoneyCents, TravelStyle, TripCmd, TripUpdate, packing::MAX_ITEM_QUANTITY,
    trips::MAX_TRAVELERS,
};

#[tokio::test]
async fn new_trip_resolves_city_defaults_for_its_style() {
    let env = setup().await;
    let city = lisbon(&env).await;

    let trip = env
        .engine
        .create_trip(
            TripCmd::new(&city.id, "  Lisbon on a shoestring ", date(2026, 5, 1), date(2026, 5, 3))
                .travel_style(TravelStyle::Budget),
            &env.alice,
        )
        .await
        .unwrap();
    assert_eq!(trip.name, "Lisbon on a shoestring");
    assert_eq!(trip.user_id, "alice");
    assert!(!trip.share.is_public);
    assert_eq!(trip.share.share_token, None);

    let detail = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(detail.city_name, "Lisbon");
    assert_eq!(detail.city_currency, "EUR");
    assert_eq!(detail.effective_costs, lisbon_costs().budget);
    assert_eq!(detail.custom_cost_count, 0);
    assert!(detail.can_edit);
}

#[tokio::test]
async fn overrides_apply_per_category_and_zero_means_default() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let overrides = CostOverrides {
        accommodation: Some(0),
        food: Some(6_000),
        transport: None,
        activities: Some(1_999),
    };
    let updated = env
        .engine
        .update_trip_budget(&trip.id, overrides, &env.alice)
        .await
        .unwrap();
    assert_eq!(updated.overrides, overrides);

    let detail = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(
        detail.effective_costs,
        DailyCostSet::new(90.0, 60.0, 12.5, 19.99)
    );
    assert_eq!(detail.custom_cost_count, 2);
    // Stored as given: zero is kept, only its meaning collapses.
    assert_eq!(detail.trip.overrides.accommodation, Some(0));
}

#[tokio::test]
async fn negative_override_is_rejected_and_nothing_is_stored() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let err = env
        .engine
        .update_trip_budget(
            &trip.id,
            CostOverrides {
                food: Some(-100),
                ..CostOverrides::default()
            },
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let detail = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(detail.trip.overrides, CostOverrides::default());
}

#[tokio::test]
async fn create_rejects_unknown_city_and_bad_dates() {
    let env = setup().await;
    let city = lisbon(&env).await;

    let err = env
        .engine
        .create_trip(
            TripCmd::new("nowhere", "Trip", date(2026, 5, 1), date(2026, 5, 2)),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("city not exists".to_string()));

    let err = env
        .engine
        .create_trip(
            TripCmd::new(&city.id, "Trip", date(2026, 5, 2), date(2026, 5, 1)),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = env
        .engine
        .create_trip(
            TripCmd::new(&city.id, "Trip", date(2026, 5, 1), date(2026, 5, 2)).travelers(0),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = env
        .engine
        .create_trip(
            TripCmd::new(&city.id, "   ", date(2026, 5, 1), date(2026, 5, 2)),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn free_accounts_hit_the_trip_limit_premium_does_not() {
    let env = setup().await;
    let city = lisbon(&env).await;

    for _ in 0..FREE_TRIP_LIMIT {
        trip_for(&env, &city, &env.alice).await;
    }
    let err = env
        .engine
        .create_trip(
            TripCmd::new(&city.id, "One too many", date(2026, 6, 1), date(2026, 6, 2)),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::LimitReached(_)));

    env.engine
        .set_user_flags("alice", None, Some(true), &env.admin)
        .await
        .unwrap();
    let alice = env.engine.principal("alice").await.unwrap();
    assert!(alice.is_premium);
    env.engine
        .create_trip(
            TripCmd::new(&city.id, "Premium trip", date(2026, 6, 1), date(2026, 6, 2)),
            &alice,
        )
        .await
        .unwrap();
    assert_eq!(
        env.engine.list_trips(&alice).await.unwrap().len() as u64,
        FREE_TRIP_LIMIT + 1
    );
}

#[tokio::test]
async fn update_trip_changes_plan_and_revalidates_dates() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let updated = env
        .engine
        .update_trip(
            &trip.id,
            TripUpdate {
                name: Some("Long weekend".to_string()),
                travel_style: Some(TravelStyle::Luxury),
                end_date: Some(date(2026, 4, 3)),
                travelers: Some(3),
                ..TripUpdate::default()
            },
            &env.alice,
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Long weekend");
    assert_eq!(updated.days(), 3);

    let detail = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(detail.trip.travelers, 3);
    assert_eq!(detail.effective_costs, lisbon_costs().luxury);

    let err = env
        .engine
        .update_trip(
            &trip.id,
            TripUpdate {
                start_date: Some(date(2026, 4, 10)),
                ..TripUpdate::default()
            },
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn budget_summary_scales_with_days_and_travelers() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    env.engine
        .update_trip_budget(
            &trip.id,
            CostOverrides {
                food: Some(6_000),
                ..CostOverrides::default()
            },
            &env.alice,
        )
        .await
        .unwrap();
    env.engine
        .add_expense(
            ExpenseCmd::new(
                &trip.id,
                ExpenseCategory::Food,
                MoneyCents::new(4_250),
                date(2026, 4, 2),
            )
            .note("Dinner in Alfama"),
            &env.alice,
        )
        .await
        .unwrap();
    env.engine
        .add_expense(
            ExpenseCmd::new(
                &trip.id,
                ExpenseCategory::Other,
                MoneyCents::new(1_000),
                date(2026, 4, 3),
            ),
            &env.alice,
        )
        .await
        .unwrap();

    let summary = env.engine.trip_budget(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(summary.days, 5);
    assert_eq!(summary.travelers, 2);
    let planned: Vec<i64> = summary.categories.iter().map(|c| c.planned.cents()).collect();
    assert_eq!(planned, vec![90_000, 60_000, 12_500, 30_000]);
    assert_eq!(summary.planned_total, MoneyCents::new(192_500));

    let food = &summary.categories[1];
    assert_eq!(food.spent, MoneyCents::new(4_250));
    assert_eq!(food.remaining, MoneyCents::new(55_750));
    assert_eq!(summary.other_spent, MoneyCents::new(1_000));
    assert_eq!(summary.spent_total, MoneyCents::new(5_250));
    assert_eq!(summary.remaining_total, MoneyCents::new(187_250));
}

#[tokio::test]
async fn expenses_are_validated_listed_and_deleted() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let err = env
        .engine
        .add_expense(
            ExpenseCmd::new(&trip.id, ExpenseCategory::Food, MoneyCents::ZERO, date(2026, 4, 1)),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidAmount("amount must be > 0".to_string()));

    let err = env
        .engine
        .add_expense(
            ExpenseCmd::new(
                &trip.id,
                ExpenseCategory::Food,
                MoneyCents::new(100),
                date(2026, 3, 31),
            ),
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let late = env
        .engine
        .add_expense(
            ExpenseCmd::new(
                &trip.id,
                ExpenseCategory::Transport,
                MoneyCents::new(300),
                date(2026, 4, 4),
            ),
            &env.alice,
        )
        .await
        .unwrap();
    let early = env
        .engine
        .add_expense(
            ExpenseCmd::new(
                &trip.id,
                ExpenseCategory::Activities,
                MoneyCents::new(1_500),
                date(2026, 4, 1),
            )
            .note("   "),
            &env.alice,
        )
        .await
        .unwrap();
    assert_eq!(early.note, None);

    let listed = env.engine.list_expenses(&trip.id, Some(&env.alice)).await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![early.id.as_str(), late.id.as_str()]);

    env.engine
        .delete_expense(&trip.id, &early.id, &env.alice)
        .await
        .unwrap();
    let err = env
        .engine
        .delete_expense(&trip.id, &early.id, &env.alice)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("expense not exists".to_string()));
}

#[tokio::test]
async fn packing_list_combines_generated_and_custom_items() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let generated = env.engine.packing_list(&trip.id, Some(&env.alice)).await.unwrap();
    assert!(!generated.is_empty());
    assert!(generated.iter().all(|item| item.id.is_none()));

    let item = env
        .engine
        .add_packing_item(&trip.id, "Camera", 1, &env.alice)
        .await
        .unwrap();
    assert!(!item.packed);
    let packed = env
        .engine
        .set_packing_item_packed(&trip.id, item.id.as_deref().unwrap(), true, &env.alice)
        .await
        .unwrap();
    assert!(packed.packed);

    let list = env.engine.packing_list(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(list.len(), generated.len() + 1);
    assert_eq!(list.last().unwrap().name, "Camera");
    assert!(list.last().unwrap().packed);

    env.engine
        .remove_packing_item(&trip.id, item.id.as_deref().unwrap(), &env.alice)
        .await
        .unwrap();
    let list = env.engine.packing_list(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(list.len(), generated.len());

    let err = env
        .engine
        .add_packing_item(&trip.id, "Socks", 0, &env.alice)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn delete_trip_removes_dependents() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    env.engine
        .share_trip_with(&trip.id, "bob", &env.alice)
        .await
        .unwrap();
    env.engine
        .add_expense(
            ExpenseCmd::new(&trip.id, ExpenseCategory::Food, MoneyCents::new(500), date(2026, 4, 1)),
            &env.alice,
        )
        .await
        .unwrap();
    env.engine
        .add_packing_item(&trip.id, "Umbrella", 1, &env.alice)
        .await
        .unwrap();

    env.engine.delete_trip(&trip.id, &env.alice).await.unwrap();

    let err = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("trip not exists".to_string()));
    assert!(env.engine.list_trips(&env.bob).await.unwrap().is_empty());

    // The city is free to go once no trip references it.
    env.engine.delete_city(&city.id, &env.admin).await.unwrap();
}

#[tokio::test]
async fn oversized_override_is_rejected_and_budget_stays_computable() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let err = env
        .engine
        .update_trip_budget(
            &trip.id,
            CostOverrides {
                food: Some(i64::MAX / 2),
                ..CostOverrides::default()
            },
            &env.alice,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    // The largest accepted override still totals without overflow, even on
    // the longest trip with the largest party.
    let max = MoneyCents::MAX.cents();
    env.engine
        .update_trip(
            &trip.id,
            TripUpdate {
                end_date: Some(date(2027, 3, 31)),
                travelers: Some(MAX_TRAVELERS),
                ..TripUpdate::default()
            },
            &env.alice,
        )
        .await
        .unwrap();
    env.engine
        .update_trip_budget(
            &trip.id,
            CostOverrides {
                accommodation: Some(max),
                food: Some(max),
                transport: Some(max),
                activities: Some(max),
            },
            &env.alice,
        )
        .await
        .unwrap();

    let summary = env.engine.trip_budget(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(summary.days, 365);
    assert_eq!(
        summary.planned_total.cents(),
        max * 4 * 365 * i64::from(MAX_TRAVELERS)
    );
}

#[tokio::test]
async fn oversized_expense_is_rejected() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    for amount in [MoneyCents::new(MoneyCents::MAX.cents() + 1), MoneyCents::new(i64::MAX)] {
        let err = env
            .engine
            .add_expense(
                ExpenseCmd::new(&trip.id, ExpenseCategory::Other, amount, date(2026, 4, 2)),
                &env.alice,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    env.engine
        .add_expense(
            ExpenseCmd::new(&trip.id, ExpenseCategory::Other, MoneyCents::MAX, date(2026, 4, 2)),
            &env.alice,
        )
        .await
        .unwrap();
    let summary = env.engine.trip_budget(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(summary.other_spent, MoneyCents::MAX);
}

#[tokio::test]
async fn party_size_is_bounded_and_never_corrupts_the_trip_list() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    for travelers in [MAX_TRAVELERS + 1, 3_000_000_000] {
        let err = env
            .engine
            .create_trip(
                TripCmd::new(&city.id, "Crowd", date(2026, 6, 1), date(2026, 6, 2))
                    .travelers(travelers),
                &env.alice,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));

        let err = env
            .engine
            .update_trip(
                &trip.id,
                TripUpdate {
                    travelers: Some(travelers),
                    ..TripUpdate::default()
                },
                &env.alice,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    let trips = env.engine.list_trips(&env.alice).await.unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].trip.travelers, 2);
}

#[tokio::test]
async fn packing_quantity_is_bounded() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    for quantity in [0, MAX_ITEM_QUANTITY + 1, 3_000_000_000] {
        let err = env
            .engine
            .add_packing_item(&trip.id, "Socks", quantity, &env.alice)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    let item = env
        .engine
        .add_packing_item(&trip.id, "Socks", MAX_ITEM_QUANTITY, &env.alice)
        .await
        .unwrap();
    assert_eq!(item.quantity, MAX_ITEM_QUANTITY);
    let list = env.engine.packing_list(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(list.last().unwrap().quantity, MAX_ITEM_QUANTITY);
}

#[tokio::test]
async fn date_change_cannot_strand_expenses() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    env.engine
        .add_expense(
            ExpenseCmd::new(
                &trip.id,
                ExpenseCategory::Food,
                MoneyCents::new(1_200),
                date(2026, 4, 4),
            ),
            &env.alice,
        )
        .await
        .unwrap();

    let err = env
        .engine
        .update_trip(
            &trip.id,
            TripUpdate {
                end_date: Some(date(2026, 4, 3)),
                ..TripUpdate::default()
            },
            &env.alice,
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("1 expenses fall outside the new dates".to_string())
    );
    let detail = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap();
    assert_eq!(detail.trip.end_date, date(2026, 4, 5));

    // Shrinking around the expense is fine.
    let updated = env
        .engine
        .update_trip(
            &trip.id,
            TripUpdate {
                start_date: Some(date(2026, 4, 3)),
                end_date: Some(date(2026, 4, 4)),
                ..TripUpdate::default()
            },
            &env.alice,
        )
        .await
        .unwrap();
    assert_eq!(updated.days(), 2);
}
