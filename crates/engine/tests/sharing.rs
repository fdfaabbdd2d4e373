mod common;

use common::{date, lisbon, setup, trip_for};
use engine::{
    CostOverrides, EngineError, ExpenseCategory, ExpenseCmd, MoneyCents, TripUpdate, Visibility,
};

fn not_found() -> EngineError {
    EngineError::KeyNotFound("trip not exists".to_string())
}

#[tokio::test]
async fn token_is_generated_once_and_survives_revoke() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let off = env
        .engine
        .set_trip_public(&trip.id, false, &env.alice)
        .await
        .unwrap();
    assert_eq!(off.visibility(), Visibility::Private);
    assert_eq!(env.token_calls(), 0);

    let public = env
        .engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    assert_eq!(public.visibility(), Visibility::Public);
    assert_eq!(public.share_token.as_deref(), Some("token-1"));

    let again = env
        .engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    assert_eq!(again, public);

    let revoked = env
        .engine
        .set_trip_public(&trip.id, false, &env.alice)
        .await
        .unwrap();
    assert_eq!(revoked.visibility(), Visibility::Revoked);
    assert_eq!(revoked.share_token.as_deref(), Some("token-1"));

    let reshared = env
        .engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    assert_eq!(reshared.share_token.as_deref(), Some("token-1"));
    assert_eq!(env.token_calls(), 1);
}

#[tokio::test]
async fn by_token_lookup_never_leaks_private_trips() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    assert_eq!(env.engine.shared_trip("token-1").await.unwrap_err(), not_found());

    let state = env
        .engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    let token = state.share_token.unwrap();

    let detail = env.engine.shared_trip(&token).await.unwrap();
    assert_eq!(detail.trip.id, trip.id);
    assert!(!detail.can_edit);
    let summary = env.engine.shared_trip_budget(&token).await.unwrap();
    assert_eq!(summary.days, 5);

    env.engine
        .set_trip_public(&trip.id, false, &env.alice)
        .await
        .unwrap();
    assert_eq!(env.engine.shared_trip(&token).await.unwrap_err(), not_found());
    assert_eq!(
        env.engine.shared_trip_budget(&token).await.unwrap_err(),
        not_found()
    );

    env.engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    assert_eq!(env.engine.shared_trip(&token).await.unwrap().trip.id, trip.id);
    assert_eq!(env.engine.shared_trip("token-2").await.unwrap_err(), not_found());
}

#[tokio::test]
async fn public_flag_opens_reads_to_everyone_but_writes_to_nobody() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let err = env.engine.trip(&trip.id, None).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    let err = env.engine.trip(&trip.id, Some(&env.carol)).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    env.engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();

    let anonymous = env.engine.trip(&trip.id, None).await.unwrap();
    assert!(!anonymous.can_edit);
    let carol = env.engine.trip(&trip.id, Some(&env.carol)).await.unwrap();
    assert!(!carol.can_edit);
    env.engine
        .packing_list(&trip.id, Some(&env.carol))
        .await
        .unwrap();

    let err = env
        .engine
        .update_trip_budget(&trip.id, CostOverrides::default(), &env.carol)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn explicit_share_grants_read_independently_of_public_flag() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let share = env
        .engine
        .share_trip_with(&trip.id, " bob ", &env.alice)
        .await
        .unwrap();
    assert_eq!(share.shared_with_id, "bob");
    assert_eq!(share.shared_by_id, "alice");

    let detail = env.engine.trip(&trip.id, Some(&env.bob)).await.unwrap();
    assert!(!detail.can_edit);
    env.engine
        .list_expenses(&trip.id, Some(&env.bob))
        .await
        .unwrap();
    env.engine
        .trip_budget(&trip.id, Some(&env.bob))
        .await
        .unwrap();

    let listed = env.engine.list_trips(&env.bob).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].shared_with_me);
    assert_eq!(listed[0].city_name, "Lisbon");

    // Toggling public sharing does not touch explicit grants.
    env.engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    env.engine
        .set_trip_public(&trip.id, false, &env.alice)
        .await
        .unwrap();
    env.engine.trip(&trip.id, Some(&env.bob)).await.unwrap();
    let err = env.engine.trip(&trip.id, Some(&env.carol)).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    env.engine
        .revoke_trip_share(&trip.id, "bob", &env.alice)
        .await
        .unwrap();
    let err = env.engine.trip(&trip.id, Some(&env.bob)).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    assert!(env.engine.list_trips(&env.bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn share_targets_are_checked() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;

    let err = env
        .engine
        .share_trip_with(&trip.id, "alice", &env.alice)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = env
        .engine
        .share_trip_with(&trip.id, "mallory", &env.alice)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));

    env.engine
        .share_trip_with(&trip.id, "bob", &env.alice)
        .await
        .unwrap();
    let err = env
        .engine
        .share_trip_with(&trip.id, "bob", &env.alice)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    let err = env
        .engine
        .revoke_trip_share(&trip.id, "carol", &env.alice)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    env.engine
        .share_trip_with(&trip.id, "carol", &env.alice)
        .await
        .unwrap();
    let shares = env.engine.list_trip_shares(&trip.id, &env.alice).await.unwrap();
    let names: Vec<&str> = shares.iter().map(|s| s.shared_with_id.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);
}

#[tokio::test]
async fn explicit_share_never_grants_write() {
    let env = setup().await;
    let city = lisbon(&env).await;
    let trip = trip_for(&env, &city, &env.alice).await;
    env.engine
        .share_trip_with(&trip.id, "bob", &env.alice)
        .await
        .unwrap();
    env.engine
        .set_trip_public(&trip.id, true, &env.alice)
        .await
        .unwrap();
    let expense = env
        .engine
        .add_expense(
            ExpenseCmd::new(&trip.id, ExpenseCategory::Food, MoneyCents::new(800), date(2026, 4, 2)),
            &env.alice,
        )
        .await
        .unwrap();
    let item = env
        .engine
        .add_packing_item(&trip.id, "Sunscreen", 1, &env.alice)
        .await
        .unwrap();
    let item_id = item.id.unwrap();
    let bob = &env.bob;

    let results = vec![
        env.engine
            .update_trip(&trip.id, TripUpdate::default(), bob)
            .await
            .map(|_| ()),
        env.engine
            .update_trip_budget(&trip.id, CostOverrides::default(), bob)
            .await
            .map(|_| ()),
        env.engine
            .set_trip_public(&trip.id, false, bob)
            .await
            .map(|_| ()),
        env.engine
            .share_trip_with(&trip.id, "carol", bob)
            .await
            .map(|_| ()),
        env.engine.revoke_trip_share(&trip.id, "bob", bob).await,
        env.engine
            .list_trip_shares(&trip.id, bob)
            .await
            .map(|_| ()),
        env.engine
            .add_expense(
                ExpenseCmd::new(&trip.id, ExpenseCategory::Food, MoneyCents::new(1), date(2026, 4, 2)),
                bob,
            )
            .await
            .map(|_| ()),
        env.engine.delete_expense(&trip.id, &expense.id, bob).await,
        env.engine
            .add_packing_item(&trip.id, "Hat", 1, bob)
            .await
            .map(|_| ()),
        env.engine
            .set_packing_item_packed(&trip.id, &item_id, true, bob)
            .await
            .map(|_| ()),
        env.engine.remove_packing_item(&trip.id, &item_id, bob).await,
        env.engine.delete_trip(&trip.id, bob).await,
    ];
    for (idx, result) in results.into_iter().enumerate() {
        assert!(
            matches!(result, Err(EngineError::Forbidden(_))),
            "operation #{idx} was not forbidden: {result:?}"
        );
    }

    // Nothing changed underneath.
    let detail = env.engine.trip(&trip.id, Some(&env.alice)).await.unwrap();
    assert!(detail.trip.share.is_public);
    assert_eq!(
        env.engine
            .list_expenses(&trip.id, Some(&env.alice))
            .await
            .unwrap()
            .len(),
        1
    );
}
