use sea_orm::Order;

use crate::types::OrderDirection;

pub(crate) mod blockchain_repository;
pub(crate) mod photo_submitted_repository;
pub(crate) mod platform_fee_repository;
pub(crate) mod quest_cancelled_repository;
pub(crate) mod quest_completed_repository;
pub(crate) mod quest_created_repository;
pub(crate) mod submissions_selected_repository;

pub(crate) fn sort_order(direction: OrderDirection) -> Order {
    match direction {
        OrderDirection::Asc => Order::Asc,
        OrderDirection::Desc => Order::Desc,
    }
}
