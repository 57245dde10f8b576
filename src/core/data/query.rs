//! Read-query construction for the songs table
//!
//! A `SongQuery` is built from a normalized [`SongFilter`] by collecting
//! (predicate, bound value) pairs in a fixed field order and joining them.
//! Values never touch the SQL text; they travel as named parameters.

use rusqlite::types::{ToSql, ToSqlOutput};

use crate::core::filter::SongFilter;

const SELECT_SONGS: &str = r#"SELECT id, title, "group", text, link, date FROM songs"#;

/// A value bound to a named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Integer(v) => v.to_sql(),
            SqlValue::Text(v) => v.to_sql(),
        }
    }
}

/// One `column = :param` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub param: &'static str,
    pub value: SqlValue,
}

impl Predicate {
    fn new(column: &'static str, param: &'static str, value: SqlValue) -> Self {
        Self { column, param, value }
    }

    pub fn fragment(&self) -> String {
        format!("{} = {}", self.column, self.param)
    }
}

/// Parametrized SELECT over the songs table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub sql: String,
    pub predicates: Vec<Predicate>,
    /// Every bound value in statement order: predicates, then limit and offset.
    pub params: Vec<(&'static str, SqlValue)>,
}

impl SongQuery {
    pub fn build(filter: &SongFilter) -> Self {
        let mut predicates = Vec::new();

        if filter.id != 0 {
            predicates.push(Predicate::new("id", ":id", SqlValue::Integer(filter.id)));
        }

        if !filter.title.is_empty() {
            predicates.push(Predicate::new("title", ":title", SqlValue::Text(filter.title.clone())));
        }

        if !filter.group.is_empty() {
            predicates.push(Predicate::new(r#""group""#, ":group", SqlValue::Text(filter.group.clone())));
        }

        if !filter.date.is_empty() {
            predicates.push(Predicate::new("date", ":date", SqlValue::Text(filter.date.clone())));
        }

        let mut sql = SELECT_SONGS.to_string();

        if !predicates.is_empty() {
            let conditions = predicates
                .iter()
                .map(Predicate::fragment)
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }

        sql.push_str(" LIMIT :limit OFFSET :offset");

        let mut params: Vec<(&'static str, SqlValue)> = predicates
            .iter()
            .map(|p| (p.param, p.value.clone()))
            .collect();
        params.push((":limit", SqlValue::Integer(filter.limit)));
        params.push((":offset", SqlValue::Integer(filter.offset)));

        Self { sql, predicates, params }
    }

    pub fn has_where_clause(&self) -> bool {
        !self.predicates.is_empty()
    }

    /// Parameters in the shape `rusqlite` accepts for named binding.
    pub fn named_params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect()
    }
}
