//! Turns filters into `WHERE` clauses, so the store can do the filtering
//! when the whole catalog isn't already in memory.

use sea_query::*;

use super::{
    engine::parse_price,
    filter::{FilterCondition, FilterField, FilterOperator, FilterState},
};

/// The destinations table
#[derive(Iden)]
pub enum Destinations {
    Table,
    Id,
    Name,
    Description,
    ImageUrl,
    ImageResource,
    IsFavorite,
    CategoryId,
    PlaceTypeId,
    ProvinceId,
    Price,
    Latitude,
    Longitude,
}

/// The column holding a field's text.
fn column(field: FilterField) -> Destinations {
    match field {
        FilterField::Name => Destinations::Name,
        FilterField::Category => Destinations::CategoryId,
        FilterField::PlaceType => Destinations::PlaceTypeId,
        FilterField::Province => Destinations::ProvinceId,
        FilterField::Price => Destinations::Price,
    }
}

/// A filter must become a query to be used remotely.
pub trait ToQuery {
    /// Converts the filter into a clause for use in querying the database.
    fn to_query(&self) -> SimpleExpr;
}

impl ToQuery for FilterCondition {
    #[tracing::instrument(skip_all, fields(condition = %self))]
    fn to_query(&self) -> SimpleExpr {
        match (self.operator(), self.field()) {
            (FilterOperator::Contains, FilterField::Price) => {
                match parse_price(self.value()).and_then(|p| <i64 as TryFrom<u64>>::try_from(p).ok()) {
                    Some(price) => {
                        tracing::debug!("Looking for price = {price}");
                        Expr::col(Destinations::Price).eq(price)
                    }
                    None => {
                        tracing::debug!("Price value isn't a number. Nothing will match.");
                        Expr::val(1).eq(0)
                    }
                }
            }

            // `LIKE` is case-insensitive for ASCII in SQLite :)
            (FilterOperator::Contains, field) => {
                let pattern = format!("%{}%", escape_like(self.value()));
                tracing::debug!("Checking `{field:?}` for pattern `{pattern}`");
                Expr::col(column(field)).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
            }
        }
    }
}

impl ToQuery for FilterState {
    /// Every condition ANDed together. An empty state is always true.
    fn to_query(&self) -> SimpleExpr {
        self.conditions()
            .iter()
            .map(ToQuery::to_query)
            .reduce(SimpleExpr::and)
            .unwrap_or_else(|| Expr::val(1).eq(1))
    }
}

/// Marks the next character of a `LIKE` pattern as literal.
///
/// Not a backslash, since quoting one differs between backends.
const LIKE_ESCAPE: char = '!';

/// Escapes the `LIKE` wildcards, so user input only ever matches literally.
fn escape_like(raw: &str) -> String {
    let mut s = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            s.push(LIKE_ESCAPE);
        }
        s.push(c);
    }
    s
}

/// Every column of every destination, ordered by name.
pub fn select_destinations() -> SelectStatement {
    Query::select()
        .column(Asterisk)
        .from(Destinations::Table)
        .order_by(Destinations::Name, Order::Asc)
        .to_owned()
}

/// Destinations whose name starts with `prefix`, case-sensitively.
///
/// This is a range over the name index: `prefix <= name <= prefix + U+F8FF`.
pub fn name_prefix(prefix: &str) -> SimpleExpr {
    Expr::col(Destinations::Name).between(prefix.to_owned(), format!("{prefix}\u{f8ff}"))
}

/// Destinations in exactly this category.
pub fn category_equals(category_id: &str) -> SimpleExpr {
    Expr::col(Destinations::CategoryId).eq(category_id)
}

pub fn is_favorite() -> SimpleExpr {
    Expr::col(Destinations::IsFavorite).eq(true)
}

pub fn id_equals(id: &str) -> SimpleExpr {
    Expr::col(Destinations::Id).eq(id)
}
