use serde::Deserialize;

use super::{parse_id, FilterError};
use crate::database::RecordId;

/// Query string accepted by `GET /categories`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryQuery {
    ById(RecordId),
    All,
}

impl TryFrom<&CategoryParams> for CategoryQuery {
    type Error = FilterError;

    fn try_from(params: &CategoryParams) -> Result<Self, Self::Error> {
        match params.id.as_deref() {
            Some(id) => Ok(CategoryQuery::ById(parse_id(id)?)),
            None => Ok(CategoryQuery::All),
        }
    }
}
