//! Conversions between engine values and the JSON types of `api_types`.

use api_types::{
    DailyCosts, TravelStyle as ApiTravelStyle,
    budget::{BudgetSummary as ApiBudgetSummary, CategoryBudget, CostCategory as ApiCostCategory},
    city::{CityCosts as ApiCityCosts, CityView},
    expense::{ExpenseCategory as ApiExpenseCategory, ExpenseView},
    packing::{PackingCategory as ApiPackingCategory, PackingItem as ApiPackingItem},
    share::ShareView,
    trip::{
        BudgetOverrides, ShareState as ApiShareState, TripDetail as ApiTripDetail, TripView,
        Visibility as ApiVisibility,
    },
    user::UserView as ApiUserView,
};
use engine::{
    BudgetSummary, City, CityCosts, CostCategory, CostOverrides, DailyCostSet, Expense,
    ExpenseCategory, ExplicitShare, PackingCategory, PackingItem, ShareState, TravelStyle, Trip,
    TripDetail, UserView, Visibility,
};

pub(crate) fn travel_style(style: ApiTravelStyle) -> TravelStyle {
    match style {
        ApiTravelStyle::Budget => TravelStyle::Budget,
        ApiTravelStyle::MidRange => TravelStyle::MidRange,
        ApiTravelStyle::Luxury => TravelStyle::Luxury,
    }
}

fn api_travel_style(style: TravelStyle) -> ApiTravelStyle {
    match style {
        TravelStyle::Budget => ApiTravelStyle::Budget,
        TravelStyle::MidRange => ApiTravelStyle::MidRange,
        TravelStyle::Luxury => ApiTravelStyle::Luxury,
    }
}

pub(crate) fn daily_costs(costs: DailyCosts) -> DailyCostSet {
    DailyCostSet::new(costs.accommodation, costs.food, costs.transport, costs.activities)
}

fn api_daily_costs(costs: &DailyCostSet) -> DailyCosts {
    DailyCosts {
        accommodation: costs.accommodation,
        food: costs.food,
        transport: costs.transport,
        activities: costs.activities,
    }
}

pub(crate) fn city_costs(costs: ApiCityCosts) -> CityCosts {
    CityCosts {
        budget: daily_costs(costs.budget),
        mid_range: daily_costs(costs.mid_range),
        luxury: daily_costs(costs.luxury),
    }
}

pub(crate) fn city_view(city: &City, distance_km: Option<f64>) -> CityView {
    CityView {
        id: city.id.clone(),
        name: city.name.clone(),
        country: city.country.clone(),
        country_code: city.country_code.clone(),
        flag: city.flag(),
        latitude: city.latitude,
        longitude: city.longitude,
        currency: city.currency.clone(),
        tips: city.tips.clone(),
        transport_info: city.transport_info.clone(),
        cash_info: city.cash_info.clone(),
        costs: ApiCityCosts {
            budget: api_daily_costs(&city.costs.budget),
            mid_range: api_daily_costs(&city.costs.mid_range),
            luxury: api_daily_costs(&city.costs.luxury),
        },
        distance_km,
    }
}

pub(crate) fn overrides(budget: BudgetOverrides) -> CostOverrides {
    CostOverrides {
        accommodation: budget.accommodation,
        food: budget.food,
        transport: budget.transport,
        activities: budget.activities,
    }
}

fn api_visibility(visibility: Visibility) -> ApiVisibility {
    match visibility {
        Visibility::Private => ApiVisibility::Private,
        Visibility::Revoked => ApiVisibility::Revoked,
        // The engine refuses to persist a public trip without token.
        Visibility::Public | Visibility::Unresolved => ApiVisibility::Public,
    }
}

/// `with_token` must only be set for the owner.
pub(crate) fn trip_view(trip: &Trip, city_name: &str, with_token: bool) -> TripView {
    TripView {
        id: trip.id.clone(),
        owner: trip.user_id.clone(),
        city_id: trip.city_id.clone(),
        city_name: city_name.to_string(),
        name: trip.name.clone(),
        travel_style: api_travel_style(trip.travel_style),
        start_date: trip.start_date,
        end_date: trip.end_date,
        days: trip.days(),
        travelers: trip.travelers,
        budget: BudgetOverrides {
            accommodation: trip.overrides.accommodation,
            food: trip.overrides.food,
            transport: trip.overrides.transport,
            activities: trip.overrides.activities,
        },
        visibility: api_visibility(trip.share.visibility()),
        share_token: if with_token {
            trip.share.share_token.clone()
        } else {
            None
        },
        created_at: trip.created_at,
    }
}

pub(crate) fn trip_detail(detail: &TripDetail) -> ApiTripDetail {
    ApiTripDetail {
        trip: trip_view(&detail.trip, &detail.city_name, detail.can_edit),
        currency: detail.city_currency.clone(),
        effective_costs: api_daily_costs(&detail.effective_costs),
        custom_cost_count: detail.custom_cost_count,
        can_edit: detail.can_edit,
    }
}

pub(crate) fn share_state(state: &ShareState) -> ApiShareState {
    ApiShareState {
        is_public: state.is_public,
        share_token: state.share_token.clone(),
        visibility: api_visibility(state.visibility()),
    }
}

pub(crate) fn share_view(share: ExplicitShare) -> ShareView {
    ShareView {
        username: share.shared_with_id,
        shared_by: share.shared_by_id,
        created_at: share.created_at,
    }
}

fn api_cost_category(category: CostCategory) -> ApiCostCategory {
    match category {
        CostCategory::Accommodation => ApiCostCategory::Accommodation,
        CostCategory::Food => ApiCostCategory::Food,
        CostCategory::Transport => ApiCostCategory::Transport,
        CostCategory::Activities => ApiCostCategory::Activities,
    }
}

pub(crate) fn budget_summary(summary: &BudgetSummary) -> ApiBudgetSummary {
    ApiBudgetSummary {
        days: summary.days,
        travelers: summary.travelers,
        daily: api_daily_costs(&summary.daily),
        categories: summary
            .categories
            .iter()
            .map(|c| CategoryBudget {
                category: api_cost_category(c.category),
                planned_minor: c.planned.cents(),
                spent_minor: c.spent.cents(),
                remaining_minor: c.remaining.cents(),
            })
            .collect(),
        other_spent_minor: summary.other_spent.cents(),
        planned_total_minor: summary.planned_total.cents(),
        spent_total_minor: summary.spent_total.cents(),
        remaining_total_minor: summary.remaining_total.cents(),
    }
}

pub(crate) fn expense_category(category: ApiExpenseCategory) -> ExpenseCategory {
    match category {
        ApiExpenseCategory::Accommodation => ExpenseCategory::Accommodation,
        ApiExpenseCategory::Food => ExpenseCategory::Food,
        ApiExpenseCategory::Transport => ExpenseCategory::Transport,
        ApiExpenseCategory::Activities => ExpenseCategory::Activities,
        ApiExpenseCategory::Other => ExpenseCategory::Other,
    }
}

fn api_expense_category(category: ExpenseCategory) -> ApiExpenseCategory {
    match category {
        ExpenseCategory::Accommodation => ApiExpenseCategory::Accommodation,
        ExpenseCategory::Food => ApiExpenseCategory::Food,
        ExpenseCategory::Transport => ApiExpenseCategory::Transport,
        ExpenseCategory::Activities => ApiExpenseCategory::Activities,
        ExpenseCategory::Other => ApiExpenseCategory::Other,
    }
}

pub(crate) fn expense_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        category: api_expense_category(expense.category),
        amount_minor: expense.amount.cents(),
        note: expense.note,
        spent_on: expense.spent_on,
        created_by: expense.created_by,
        created_at: expense.created_at,
    }
}

pub(crate) fn packing_item(item: PackingItem) -> ApiPackingItem {
    ApiPackingItem {
        id: item.id,
        name: item.name,
        category: match item.category {
            PackingCategory::Documents => ApiPackingCategory::Documents,
            PackingCategory::Clothing => ApiPackingCategory::Clothing,
            PackingCategory::Toiletries => ApiPackingCategory::Toiletries,
            PackingCategory::Electronics => ApiPackingCategory::Electronics,
            PackingCategory::Extras => ApiPackingCategory::Extras,
            PackingCategory::Custom => ApiPackingCategory::Custom,
        },
        quantity: item.quantity,
        packed: item.packed,
    }
}

pub(crate) fn user_view(user: UserView) -> ApiUserView {
    ApiUserView {
        username: user.username,
        is_admin: user.is_admin,
        is_premium: user.is_premium,
    }
}
