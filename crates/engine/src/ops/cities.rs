use std::collections::HashMap;

use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    Capability, City, CityCmd, CityUpdate, DailyCostSet, EngineError, Principal, ResultEngine,
    TravelStyle, cities, cities::city_daily_costs, geo, trips, util::normalize_name_key,
};

use super::{CityListing, Engine, normalize_optional_text, normalize_required_name, with_tx};

fn name_key(name: &str) -> ResultEngine<String> {
    normalize_name_key(name)
        .ok_or_else(|| EngineError::InvalidInput("city name must not be empty".to_string()))
}

impl Engine {
    /// Lists cities whose normalized name contains `search`.
    ///
    /// With an `origin` every listing carries its distance and the result is
    /// sorted nearest first; otherwise it is sorted by name.
    pub async fn list_cities(
        &self,
        search: Option<&str>,
        origin: Option<(f64, f64)>,
    ) -> ResultEngine<Vec<CityListing>> {
        if let Some((lat, lon)) = origin
            && !geo::valid_coordinates(lat, lon)
        {
            return Err(EngineError::InvalidInput(
                "coordinates out of range".to_string(),
            ));
        }
        let needle = search.and_then(normalize_name_key);

        with_tx!(self, |db_tx| {
            let mut query = cities::Entity::find().order_by_asc(cities::Column::NameNorm);
            if let Some(needle) = &needle {
                query = query.filter(cities::Column::NameNorm.contains(needle.as_str()));
            }
            let models = query.all(&db_tx).await?;

            let mut cost_rows: HashMap<String, Vec<city_daily_costs::Model>> = HashMap::new();
            if !models.is_empty() {
                let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
                for row in city_daily_costs::Entity::find()
                    .filter(city_daily_costs::Column::CityId.is_in(ids))
                    .all(&db_tx)
                    .await?
                {
                    cost_rows.entry(row.city_id.clone()).or_default().push(row);
                }
            }

            let mut listings = Vec::with_capacity(models.len());
            for model in models {
                let rows = cost_rows.remove(&model.id).unwrap_or_default();
                let city = City::from_rows(model, rows)?;
                let distance_km = origin.map(|(lat, lon)| city.distance_km_from(lat, lon));
                listings.push(CityListing { city, distance_km });
            }
            if origin.is_some() {
                listings.sort_by(|a, b| {
                    a.distance_km
                        .unwrap_or(f64::MAX)
                        .total_cmp(&b.distance_km.unwrap_or(f64::MAX))
                });
            }
            Ok(listings)
        })
    }

    /// A city with its daily costs for every travel style.
    pub async fn city(&self, city_id: &str) -> ResultEngine<City> {
        with_tx!(self, |db_tx| self.load_city(&db_tx, city_id).await)
    }

    /// Creates a city with its three cost presets [`Capability::ManageCities`].
    pub async fn create_city(&self, cmd: CityCmd, principal: &Principal) -> ResultEngine<City> {
        self.require_capability(principal, Capability::ManageCities)?;
        let name = normalize_required_name(&cmd.name, "city")?;
        let name_norm = name_key(&name)?;

        let mut city = City::new(
            name,
            cmd.country.trim().to_string(),
            cmd.country_code.trim().to_string(),
            cmd.latitude,
            cmd.longitude,
            cmd.currency.trim().to_string(),
            cmd.costs,
        );
        city.tips = normalize_optional_text(cmd.tips.as_deref());
        city.transport_info = normalize_optional_text(cmd.transport_info.as_deref());
        city.cash_info = normalize_optional_text(cmd.cash_info.as_deref());
        city.validate()?;

        with_tx!(self, |db_tx| {
            ensure_unique_name(&db_tx, &name_norm, &city.country_code, None).await?;

            cities::ActiveModel::from_city(&city, name_norm)
                .insert(&db_tx)
                .await?;
            city_daily_costs::Entity::insert_many(city.cost_models())
                .exec_without_returning(&db_tx)
                .await?;
            tracing::info!(city_id = %city.id, name = %city.name, "city created");
            Ok(city)
        })
    }

    /// Updates city content [`Capability::ManageCities`].
    pub async fn update_city(
        &self,
        city_id: &str,
        update: CityUpdate,
        principal: &Principal,
    ) -> ResultEngine<City> {
        self.require_capability(principal, Capability::ManageCities)?;
        with_tx!(self, |db_tx| {
            let mut city = self.load_city(&db_tx, city_id).await?;
            if let Some(name) = &update.name {
                city.name = normalize_required_name(name, "city")?;
            }
            if let Some(country) = &update.country {
                city.country = country.trim().to_string();
            }
            if let Some(code) = &update.country_code {
                city.country_code = code.trim().to_ascii_uppercase();
            }
            if let Some(latitude) = update.latitude {
                city.latitude = latitude;
            }
            if let Some(longitude) = update.longitude {
                city.longitude = longitude;
            }
            if let Some(currency) = &update.currency {
                city.currency = currency.trim().to_ascii_uppercase();
            }
            if let Some(tips) = &update.tips {
                city.tips = normalize_optional_text(tips.as_deref());
            }
            if let Some(info) = &update.transport_info {
                city.transport_info = normalize_optional_text(info.as_deref());
            }
            if let Some(info) = &update.cash_info {
                city.cash_info = normalize_optional_text(info.as_deref());
            }
            city.validate()?;

            let name_norm = name_key(&city.name)?;
            ensure_unique_name(
                &db_tx,
                &name_norm,
                &city.country_code,
                Some(city.id.as_str()),
            )
            .await?;
            cities::ActiveModel::from_city(&city, name_norm)
                .update(&db_tx)
                .await?;
            Ok(city)
        })
    }

    /// Replaces the default daily costs of one travel style
    /// [`Capability::ManageCities`].
    pub async fn set_city_daily_costs(
        &self,
        city_id: &str,
        style: TravelStyle,
        costs: DailyCostSet,
        principal: &Principal,
    ) -> ResultEngine<City> {
        self.require_capability(principal, Capability::ManageCities)?;
        costs.validate()?;
        with_tx!(self, |db_tx| {
            let mut city = self.load_city(&db_tx, city_id).await?;
            city.costs.set_style(style, costs);

            city_daily_costs::ActiveModel::new(&city.id, style, &costs)
                .update(&db_tx)
                .await?;
            Ok(city)
        })
    }

    /// Deletes a city [`Capability::ManageCities`]. Refused while any trip
    /// points at it.
    pub async fn delete_city(&self, city_id: &str, principal: &Principal) -> ResultEngine<()> {
        self.require_capability(principal, Capability::ManageCities)?;
        with_tx!(self, |db_tx| {
            let city = self.load_city(&db_tx, city_id).await?;
            let in_use = trips::Entity::find()
                .filter(trips::Column::CityId.eq(city.id.clone()))
                .count(&db_tx)
                .await?;
            if in_use > 0 {
                return Err(EngineError::InvalidInput(format!(
                    "city is used by {in_use} trips"
                )));
            }

            city_daily_costs::Entity::delete_many()
                .filter(city_daily_costs::Column::CityId.eq(city.id.clone()))
                .exec(&db_tx)
                .await?;
            cities::Entity::delete_by_id(city.id.clone())
                .exec(&db_tx)
                .await?;
            tracing::info!(city_id = %city.id, "city deleted");
            Ok(())
        })
    }
}

async fn ensure_unique_name(
    db: &DatabaseTransaction,
    name_norm: &str,
    country_code: &str,
    except_id: Option<&str>,
) -> ResultEngine<()> {
    let mut query = cities::Entity::find()
        .filter(cities::Column::NameNorm.eq(name_norm.to_string()))
        .filter(cities::Column::CountryCode.eq(country_code.to_string()));
    if let Some(id) = except_id {
        query = query.filter(cities::Column::Id.ne(id.to_string()));
    }
    if query.one(db).await?.is_some() {
        return Err(EngineError::ExistingKey(format!(
            "city {name_norm} ({country_code}) already exists"
        )));
    }
    Ok(())
}
