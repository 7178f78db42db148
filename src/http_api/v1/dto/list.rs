use std::str::FromStr;

use pq_domain::{Address, QuestId};
use pq_repository::{OrderDirection, Page, QuestFilter, SubmissionFilter};
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub(crate) fn validate_address(value: &str) -> Result<(), ValidationError> {
    Address::from_str(value.trim()).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("address_format");
        error.message = Some(format!("'{value}' is not a 20-byte hex address").into());
        error
    })
}

/// Query string shared by the event list routes.
///
/// `first` is clamped to 1..=1000 rather than rejected.
#[derive(Deserialize, Debug, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListQuery {
    pub first: Option<u64>,
    pub skip: Option<u64>,
    pub order_direction: Option<OrderDirection>,
    #[validate(custom(function = "validate_address"))]
    pub requester: Option<String>,
    #[validate(custom(function = "validate_address"))]
    pub photographer: Option<String>,
    pub quest_id: Option<QuestId>,
}

impl ListQuery {
    pub(crate) fn page(&self) -> Page {
        Page::new(self.first, self.skip, self.order_direction)
    }

    pub(crate) fn quest_filter(&self) -> QuestFilter {
        QuestFilter {
            quest_ids: self.quest_id.map(|quest_id| vec![quest_id]),
            requester: parse(self.requester.as_deref()),
        }
    }

    pub(crate) fn submission_filter(&self) -> SubmissionFilter {
        SubmissionFilter {
            quest_ids: self.quest_id.map(|quest_id| vec![quest_id]),
            photographer: parse(self.photographer.as_deref()),
        }
    }
}

/// Only called after validation, so a malformed value cannot reach here.
fn parse(raw: Option<&str>) -> Option<Address> {
    raw.and_then(|raw| Address::from_str(raw.trim()).ok())
}
