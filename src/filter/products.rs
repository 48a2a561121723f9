use serde::Deserialize;

use super::{parse_id, FilterError};
use crate::database::{Filter, RecordId, StoreQuery};

pub const CATEGORY_FIELD: &str = "category_id";
pub const FEATURED_FIELD: &str = "featured";
pub const DISCOUNT_FIELD: &str = "discount";

/// Query string accepted by `GET /products`.
///
/// Everything is taken as text so that numeric coercion errors become
/// client errors with a readable message.
#[derive(Debug, Default, Deserialize)]
pub struct ProductParams {
    pub id: Option<String>,
    pub cid: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// The single strategy a products request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductQuery {
    /// `id` given
    ById(RecordId),
    /// `cid` given; results are shuffled before they are returned
    ByCategory(String),
    /// `page` and `limit` both given
    Page { skip: u64, limit: u64 },
    All,
}

impl TryFrom<&ProductParams> for ProductQuery {
    type Error = FilterError;

    /// Precedence: `id`, then `cid`, then `page`+`limit`, then everything.
    /// A lone `page` or `limit` is ignored.
    fn try_from(params: &ProductParams) -> Result<Self, Self::Error> {
        if let Some(id) = params.id.as_deref() {
            return Ok(ProductQuery::ById(parse_id(id)?));
        }

        if let Some(cid) = &params.cid {
            return Ok(ProductQuery::ByCategory(cid.clone()));
        }

        if let (Some(page), Some(limit)) = (params.page.as_deref(), params.limit.as_deref()) {
            let page = parse_page(page)?;
            let limit = parse_limit(limit)?;
            let skip = (page - 1)
                .checked_mul(limit)
                .ok_or(FilterError::PageOutOfRange { page, limit })?;
            return Ok(ProductQuery::Page { skip, limit });
        }

        Ok(ProductQuery::All)
    }
}

fn parse_page(raw: &str) -> Result<u64, FilterError> {
    match raw.trim().parse::<u64>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(FilterError::InvalidPage(raw.to_string())),
    }
}

fn parse_limit(raw: &str) -> Result<u64, FilterError> {
    match raw.trim().parse::<u64>() {
        Ok(limit) if limit >= 1 => Ok(limit),
        _ => Err(FilterError::InvalidLimit(raw.to_string())),
    }
}

/// Boolean product flags with their own listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFlag {
    Featured,
    Discount,
}

impl ProductFlag {
    pub fn field(&self) -> &'static str {
        match self {
            ProductFlag::Featured => FEATURED_FIELD,
            ProductFlag::Discount => DISCOUNT_FIELD,
        }
    }

    pub fn store_query(&self) -> StoreQuery {
        StoreQuery::matching(Filter::eq(self.field(), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: Option<&str>, cid: Option<&str>, page: Option<&str>, limit: Option<&str>) -> ProductParams {
        ProductParams {
            id: id.map(str::to_string),
            cid: cid.map(str::to_string),
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    const ID: &str = "65a1b2c3d4e5f60718293a4b";

    #[test]
    fn id_wins_over_everything() {
        let query = ProductQuery::try_from(&params(Some(ID), Some("c1"), Some("1"), Some("5"))).unwrap();
        assert_eq!(query, ProductQuery::ById(ID.parse().unwrap()));
    }

    #[test]
    fn cid_wins_over_paging() {
        let query = ProductQuery::try_from(&params(None, Some("c1"), Some("2"), Some("5"))).unwrap();
        assert_eq!(query, ProductQuery::ByCategory("c1".to_string()));
    }

    #[test]
    fn page_and_limit_compute_skip() {
        let query = ProductQuery::try_from(&params(None, None, Some("3"), Some("10"))).unwrap();
        assert_eq!(query, ProductQuery::Page { skip: 20, limit: 10 });
    }

    #[test]
    fn first_page_skips_nothing() {
        let query = ProductQuery::try_from(&params(None, None, Some("1"), Some("7"))).unwrap();
        assert_eq!(query, ProductQuery::Page { skip: 0, limit: 7 });
    }

    #[test]
    fn lone_page_or_limit_lists_everything() {
        assert_eq!(ProductQuery::try_from(&params(None, None, Some("2"), None)), Ok(ProductQuery::All));
        assert_eq!(ProductQuery::try_from(&params(None, None, None, Some("2"))), Ok(ProductQuery::All));
        assert_eq!(ProductQuery::try_from(&ProductParams::default()), Ok(ProductQuery::All));
    }

    #[test]
    fn bad_paging_values_are_client_errors() {
        assert!(matches!(
            ProductQuery::try_from(&params(None, None, Some("two"), Some("10"))),
            Err(FilterError::InvalidPage(_))
        ));
        assert!(matches!(
            ProductQuery::try_from(&params(None, None, Some("0"), Some("10"))),
            Err(FilterError::InvalidPage(_))
        ));
        assert!(matches!(
            ProductQuery::try_from(&params(None, None, Some("1"), Some("0"))),
            Err(FilterError::InvalidLimit(_))
        ));
        assert!(matches!(
            ProductQuery::try_from(&params(None, None, Some(u64::MAX.to_string().as_str()), Some("2"))),
            Err(FilterError::PageOutOfRange { .. })
        ));
    }

    #[test]
    fn malformed_id_is_rejected_even_with_cid() {
        assert!(matches!(
            ProductQuery::try_from(&params(Some("nope"), Some("c1"), None, None)),
            Err(FilterError::InvalidId(_))
        ));
    }

    #[test]
    fn flags_filter_on_true() {
        assert_eq!(
            ProductFlag::Featured.store_query(),
            StoreQuery::matching(Filter::eq("featured", true))
        );
        assert_eq!(ProductFlag::Discount.field(), "discount");
    }
}
