#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    City, CityCmd, CityCosts, DailyCostSet, Engine, Principal, TokenGenerator, Trip, TripCmd,
};
use migration::MigratorTrait;

/// Hands out `token-1`, `token-2`, ... and counts the calls.
#[derive(Debug, Default)]
pub struct SequenceTokens {
    pub calls: AtomicUsize,
}

impl TokenGenerator for SequenceTokens {
    fn generate(&self) -> String {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        format!("token-{n}")
    }
}

pub struct TestEnv {
    pub engine: Engine,
    pub db: DatabaseConnection,
    pub tokens: Arc<SequenceTokens>,
    pub admin: Principal,
    pub alice: Principal,
    pub bob: Principal,
    pub carol: Principal,
}

impl TestEnv {
    pub fn token_calls(&self) -> usize {
        self.tokens.calls.load(Ordering::SeqCst)
    }
}

pub async fn setup() -> TestEnv {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let tokens = Arc::new(SequenceTokens::default());
    let engine = Engine::builder()
        .database(db.clone())
        .token_generator(tokens.clone())
        .build()
        .await
        .unwrap();

    engine.create_user("root", "root-pass", true).await.unwrap();
    for name in ["alice", "bob", "carol"] {
        engine
            .create_user(name, &format!("{name}-pass"), false)
            .await
            .unwrap();
    }

    TestEnv {
        admin: engine.principal("root").await.unwrap(),
        alice: engine.principal("alice").await.unwrap(),
        bob: engine.principal("bob").await.unwrap(),
        carol: engine.principal("carol").await.unwrap(),
        engine,
        db,
        tokens,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn lisbon_costs() -> CityCosts {
    CityCosts {
        budget: DailyCostSet::new(35.0, 20.0, 6.0, 10.0),
        mid_range: DailyCostSet::new(90.0, 45.0, 12.5, 30.0),
        luxury: DailyCostSet::new(280.0, 110.0, 40.0, 90.0),
    }
}

pub async fn lisbon(env: &TestEnv) -> City {
    env.engine
        .create_city(
            CityCmd::new(
                "Lisbon",
                "Portugal",
                "PT",
                (38.7223, -9.1393),
                "EUR",
                lisbon_costs(),
            )
            .tips("Trams fill up early."),
            &env.admin,
        )
        .await
        .unwrap()
}

/// A five day, two traveler mid-range trip owned by `owner`.
pub async fn trip_for(env: &TestEnv, city: &City, owner: &Principal) -> Trip {
    env.engine
        .create_trip(
            TripCmd::new(&city.id, "Spring break", date(2026, 4, 1), date(2026, 4, 5))
                .travelers(2),
            owner,
        )
        .await
        .unwrap()
}
