//! Building blocks for the generic repository: bindable values, filter and
//! patch abstractions, and the parameterized statements built from them.
//!
//! Column and table names always come from `&'static str` constants on the
//! entity types; only values travel as bind parameters.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Postgres};
use streamify_core::types::{Date, DbId, Timestamp};

/// A single bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Option<DbId>),
    Text(Option<String>),
    SmallInt(Option<i16>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Date(Option<Date>),
    Timestamp(Option<Timestamp>),
    TextArray(Vec<String>),
    UuidArray(Vec<DbId>),
}

macro_rules! bind_sql_value {
    ($query:expr, $value:expr) => {
        match $value {
            SqlValue::Uuid(v) => $query.bind(v),
            SqlValue::Text(v) => $query.bind(v),
            SqlValue::SmallInt(v) => $query.bind(v),
            SqlValue::Int(v) => $query.bind(v),
            SqlValue::BigInt(v) => $query.bind(v),
            SqlValue::Float(v) => $query.bind(v),
            SqlValue::Bool(v) => $query.bind(v),
            SqlValue::Date(v) => $query.bind(v),
            SqlValue::Timestamp(v) => $query.bind(v),
            SqlValue::TextArray(v) => $query.bind(v),
            SqlValue::UuidArray(v) => $query.bind(v),
        }
    };
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            SqlValue::Uuid(None)
                | SqlValue::Text(None)
                | SqlValue::SmallInt(None)
                | SqlValue::Int(None)
                | SqlValue::BigInt(None)
                | SqlValue::Float(None)
                | SqlValue::Bool(None)
                | SqlValue::Date(None)
                | SqlValue::Timestamp(None)
        )
    }

    fn bind(self, query: Query<'_, Postgres, PgArguments>) -> Query<'_, Postgres, PgArguments> {
        bind_sql_value!(query, self)
    }

    fn bind_as<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        bind_sql_value!(query, self)
    }
}

impl From<DbId> for SqlValue {
    fn from(v: DbId) -> Self {
        SqlValue::Uuid(Some(v))
    }
}

impl From<Option<DbId>> for SqlValue {
    fn from(v: Option<DbId>) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::SmallInt(Some(v))
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(v: Option<i32>) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::BigInt(Some(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(Some(v))
    }
}

impl From<Option<f64>> for SqlValue {
    fn from(v: Option<f64>) -> Self {
        SqlValue::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(Some(v))
    }
}

impl From<Date> for SqlValue {
    fn from(v: Date) -> Self {
        SqlValue::Date(Some(v))
    }
}

impl From<Timestamp> for SqlValue {
    fn from(v: Timestamp) -> Self {
        SqlValue::Timestamp(Some(v))
    }
}

impl From<Option<Timestamp>> for SqlValue {
    fn from(v: Option<Timestamp>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl From<Vec<String>> for SqlValue {
    fn from(v: Vec<String>) -> Self {
        SqlValue::TextArray(v)
    }
}

/// One predicate of a `WHERE` clause. Conditions are joined with `AND`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `column = $n`, or `column IS NULL` when the value is null.
    Eq(&'static str, SqlValue),
    /// `column = ANY($n)`.
    AnyOf(&'static str, Vec<DbId>),
}

/// A typed selection of rows.
///
/// Each entity defines its own filter enum so callers can only filter on
/// columns that exist. The `Debug` output doubles as the key in `NotFound`
/// errors.
pub trait Filter: std::fmt::Debug + Send + Sync {
    fn conditions(&self) -> Vec<Condition>;

    /// `ORDER BY` expression, if the selection has a natural order.
    fn order_by(&self) -> Option<&'static str> {
        None
    }
}

/// A partial update of an entity.
///
/// `assignments` lists the columns to `SET`; `apply` mirrors the same change
/// onto an in-memory copy so a staged update can be returned without a
/// re-read.
pub trait Patch<E>: Send + Sync {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)>;
    fn apply(&self, entity: &mut E);
}

/// Push `column = value` when the patch field is set.
pub fn assign<T>(out: &mut Vec<(&'static str, SqlValue)>, column: &'static str, value: &Option<T>)
where
    T: Clone + Into<SqlValue>,
{
    if let Some(v) = value {
        out.push((column, v.clone().into()));
    }
}

/// Patch for entities with no updatable columns.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoPatch {}

impl<E> Patch<E> for NoPatch {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        Vec::new()
    }

    fn apply(&self, _entity: &mut E) {}
}

/// A SQL statement with its positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Statement {
    pub fn select(table: &str, columns: &str, filter: &dyn Filter, limit: Option<i64>) -> Self {
        let mut values = Vec::new();
        let mut sql = format!("SELECT {columns} FROM {table}");
        sql.push_str(&where_clause(&filter.conditions(), &mut values));
        if let Some(order) = filter.order_by() {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        Statement { sql, values }
    }

    pub fn insert(table: &str, row: Vec<(&'static str, SqlValue)>) -> Self {
        let (columns, values): (Vec<&str>, Vec<SqlValue>) = row.into_iter().unzip();
        let placeholders: Vec<String> = (1..=values.len()).map(|n| format!("${n}")).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );
        Statement { sql, values }
    }

    pub fn update(
        table: &str,
        assignments: Vec<(&'static str, SqlValue)>,
        filter: &dyn Filter,
    ) -> Self {
        let mut values = Vec::with_capacity(assignments.len());
        let sets: Vec<String> = assignments
            .into_iter()
            .map(|(column, value)| {
                values.push(value);
                format!("{column} = ${}", values.len())
            })
            .collect();
        let mut sql = format!("UPDATE {table} SET {}", sets.join(", "));
        sql.push_str(&where_clause(&filter.conditions(), &mut values));
        Statement { sql, values }
    }

    pub fn delete(table: &str, filter: &dyn Filter) -> Self {
        let mut values = Vec::new();
        let mut sql = format!("DELETE FROM {table}");
        sql.push_str(&where_clause(&filter.conditions(), &mut values));
        Statement { sql, values }
    }

    /// Execute and return the number of affected rows.
    pub async fn execute<'c, X>(&self, executor: X) -> Result<u64, sqlx::Error>
    where
        X: sqlx::Executor<'c, Database = Postgres>,
    {
        let mut query = sqlx::query(&self.sql);
        for value in &self.values {
            query = value.clone().bind(query);
        }
        Ok(query.execute(executor).await?.rows_affected())
    }

    pub async fn fetch_all<'c, X, T>(&self, executor: X) -> Result<Vec<T>, sqlx::Error>
    where
        X: sqlx::Executor<'c, Database = Postgres>,
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(&self.sql);
        for value in &self.values {
            query = value.clone().bind_as(query);
        }
        query.fetch_all(executor).await
    }
}

fn where_clause(conditions: &[Condition], values: &mut Vec<SqlValue>) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let predicates: Vec<String> = conditions
        .iter()
        .map(|condition| match condition {
            Condition::Eq(column, value) if value.is_null() => format!("{column} IS NULL"),
            Condition::Eq(column, value) => {
                values.push(value.clone());
                format!("{column} = ${}", values.len())
            }
            Condition::AnyOf(column, ids) => {
                values.push(SqlValue::UuidArray(ids.clone()));
                format!("{column} = ANY(${})", values.len())
            }
        })
        .collect();
    format!(" WHERE {}", predicates.join(" AND "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug)]
    enum Sample {
        All,
        ByOwner(DbId),
        ByOwnerAndName(DbId, Option<String>),
        AnyId(Vec<DbId>),
    }

    impl Filter for Sample {
        fn conditions(&self) -> Vec<Condition> {
            match self {
                Sample::All => vec![],
                Sample::ByOwner(id) => vec![Condition::Eq("owner_id", (*id).into())],
                Sample::ByOwnerAndName(id, name) => vec![
                    Condition::Eq("owner_id", (*id).into()),
                    Condition::Eq("name", name.clone().into()),
                ],
                Sample::AnyId(ids) => vec![Condition::AnyOf("id", ids.clone())],
            }
        }

        fn order_by(&self) -> Option<&'static str> {
            match self {
                Sample::All => Some("created_at DESC"),
                _ => None,
            }
        }
    }

    #[test]
    fn select_without_conditions_has_no_where() {
        let stmt = Statement::select("things", "id, name", &Sample::All, None);
        assert_eq!(stmt.sql, "SELECT id, name FROM things ORDER BY created_at DESC");
        assert!(stmt.values.is_empty());
    }

    #[test]
    fn select_numbers_placeholders_in_order() {
        let owner = Uuid::now_v7();
        let filter = Sample::ByOwnerAndName(owner, Some("a".into()));
        let stmt = Statement::select("things", "id", &filter, Some(1));
        assert_eq!(
            stmt.sql,
            "SELECT id FROM things WHERE owner_id = $1 AND name = $2 LIMIT 1"
        );
        assert_eq!(stmt.values, vec![SqlValue::from(owner), SqlValue::from("a")]);
    }

    #[test]
    fn null_equality_becomes_is_null() {
        let owner = Uuid::now_v7();
        let stmt = Statement::select("things", "id", &Sample::ByOwnerAndName(owner, None), None);
        assert_eq!(
            stmt.sql,
            "SELECT id FROM things WHERE owner_id = $1 AND name IS NULL"
        );
        assert_eq!(stmt.values.len(), 1);
    }

    #[test]
    fn any_of_binds_a_single_array() {
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        let stmt = Statement::select("things", "id", &Sample::AnyId(ids.clone()), None);
        assert_eq!(stmt.sql, "SELECT id FROM things WHERE id = ANY($1)");
        assert_eq!(stmt.values, vec![SqlValue::UuidArray(ids)]);
    }

    #[test]
    fn insert_lists_columns_and_placeholders() {
        let id = Uuid::now_v7();
        let stmt = Statement::insert(
            "things",
            vec![("id", id.into()), ("name", "x".into()), ("rank", 3i32.into())],
        );
        assert_eq!(
            stmt.sql,
            "INSERT INTO things (id, name, rank) VALUES ($1, $2, $3)"
        );
        assert_eq!(stmt.values.len(), 3);
    }

    #[test]
    fn update_continues_numbering_into_where() {
        let owner = Uuid::now_v7();
        let stmt = Statement::update(
            "things",
            vec![("name", "y".into()), ("rank", 4i32.into())],
            &Sample::ByOwner(owner),
        );
        assert_eq!(
            stmt.sql,
            "UPDATE things SET name = $1, rank = $2 WHERE owner_id = $3"
        );
        assert_eq!(stmt.values[2], SqlValue::from(owner));
    }

    #[test]
    fn delete_uses_filter() {
        let owner = Uuid::now_v7();
        let stmt = Statement::delete("things", &Sample::ByOwner(owner));
        assert_eq!(stmt.sql, "DELETE FROM things WHERE owner_id = $1");
    }
}
