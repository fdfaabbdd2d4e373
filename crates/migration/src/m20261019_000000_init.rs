//! Initial schema migration.
//!
//! - `users`: accounts and role flags
//! - `cities`: destinations and their travel notes
//! - `city_daily_costs`: default daily costs per city and travel style
//! - `trips`: planned visits with per-category budget overrides and sharing
//! - `shared_trips`: explicit read grants to named users
//! - `expenses`: money spent during a trip
//! - `custom_items`: packing list entries added by hand

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
    IsAdmin,
    IsPremium,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    Name,
    NameNorm,
    Country,
    CountryCode,
    Latitude,
    Longitude,
    Currency,
    Tips,
    TransportInfo,
    CashInfo,
}

#[derive(Iden)]
enum CityDailyCosts {
    Table,
    CityId,
    TravelStyle,
    Accommodation,
    Food,
    Transport,
    Activities,
}

#[derive(Iden)]
enum Trips {
    Table,
    Id,
    UserId,
    CityId,
    Name,
    TravelStyle,
    StartDate,
    EndDate,
    Travelers,
    BudgetAccommodation,
    BudgetFood,
    BudgetTransport,
    BudgetActivities,
    IsPublic,
    ShareToken,
    CreatedAt,
}

#[derive(Iden)]
enum SharedTrips {
    Table,
    TripId,
    SharedWithId,
    SharedById,
    CreatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    TripId,
    Category,
    AmountMinor,
    Note,
    SpentOn,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum CustomItems {
    Table,
    Id,
    TripId,
    Name,
    Quantity,
    Packed,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsPremium)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Cities
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cities::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cities::Name).string().not_null())
                    .col(ColumnDef::new(Cities::NameNorm).string().not_null())
                    .col(ColumnDef::new(Cities::Country).string().not_null())
                    .col(ColumnDef::new(Cities::CountryCode).string().not_null())
                    .col(ColumnDef::new(Cities::Latitude).double().not_null())
                    .col(ColumnDef::new(Cities::Longitude).double().not_null())
                    .col(ColumnDef::new(Cities::Currency).string().not_null())
                    .col(ColumnDef::new(Cities::Tips).text())
                    .col(ColumnDef::new(Cities::TransportInfo).text())
                    .col(ColumnDef::new(Cities::CashInfo).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cities-name_norm-country_code-unique")
                    .table(Cities::Table)
                    .col(Cities::NameNorm)
                    .col(Cities::CountryCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. City daily costs
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CityDailyCosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CityDailyCosts::CityId).string().not_null())
                    .col(
                        ColumnDef::new(CityDailyCosts::TravelStyle)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CityDailyCosts::Accommodation)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CityDailyCosts::Food).double().not_null())
                    .col(ColumnDef::new(CityDailyCosts::Transport).double().not_null())
                    .col(
                        ColumnDef::new(CityDailyCosts::Activities)
                            .double()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CityDailyCosts::CityId)
                            .col(CityDailyCosts::TravelStyle),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-city_daily_costs-city_id")
                            .from(CityDailyCosts::Table, CityDailyCosts::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Trips
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Trips::UserId).string().not_null())
                    .col(ColumnDef::new(Trips::CityId).string().not_null())
                    .col(ColumnDef::new(Trips::Name).string().not_null())
                    .col(
                        ColumnDef::new(Trips::TravelStyle)
                            .string()
                            .not_null()
                            .default("mid_range"),
                    )
                    .col(ColumnDef::new(Trips::StartDate).date().not_null())
                    .col(ColumnDef::new(Trips::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Trips::Travelers)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Trips::BudgetAccommodation).big_integer())
                    .col(ColumnDef::new(Trips::BudgetFood).big_integer())
                    .col(ColumnDef::new(Trips::BudgetTransport).big_integer())
                    .col(ColumnDef::new(Trips::BudgetActivities).big_integer())
                    .col(
                        ColumnDef::new(Trips::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Trips::ShareToken).string())
                    .col(
                        ColumnDef::new(Trips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trips-user_id")
                            .from(Trips::Table, Trips::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trips-city_id")
                            .from(Trips::Table, Trips::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trips-share_token-unique")
                    .table(Trips::Table)
                    .col(Trips::ShareToken)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trips-user_id")
                    .table(Trips::Table)
                    .col(Trips::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trips-city_id")
                    .table(Trips::Table)
                    .col(Trips::CityId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Shared trips
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SharedTrips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SharedTrips::TripId).string().not_null())
                    .col(
                        ColumnDef::new(SharedTrips::SharedWithId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SharedTrips::SharedById).string().not_null())
                    .col(
                        ColumnDef::new(SharedTrips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SharedTrips::TripId)
                            .col(SharedTrips::SharedWithId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shared_trips-trip_id")
                            .from(SharedTrips::Table, SharedTrips::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shared_trips-shared_with_id")
                            .from(SharedTrips::Table, SharedTrips::SharedWithId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-shared_trips-shared_with_id")
                    .table(SharedTrips::Table)
                    .col(SharedTrips::SharedWithId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::TripId).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Note).string())
                    .col(ColumnDef::new(Expenses::SpentOn).date().not_null())
                    .col(ColumnDef::new(Expenses::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-trip_id")
                            .from(Expenses::Table, Expenses::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-trip_id-spent_on")
                    .table(Expenses::Table)
                    .col(Expenses::TripId)
                    .col(Expenses::SpentOn)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Custom packing items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CustomItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomItems::TripId).string().not_null())
                    .col(ColumnDef::new(CustomItems::Name).string().not_null())
                    .col(
                        ColumnDef::new(CustomItems::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(CustomItems::Packed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-custom_items-trip_id")
                            .from(CustomItems::Table, CustomItems::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse creation order (FK dependencies).
        manager
            .drop_table(Table::drop().table(CustomItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SharedTrips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CityDailyCosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
