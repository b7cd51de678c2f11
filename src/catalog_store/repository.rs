//! Generic repository over one entity table.
//!
//! A single implementation serves every entity type: the `Entity` trait
//! describes the table, `Filter` is the typed query language compiled into
//! parameterized SQL, and staged writes are committed atomically by the
//! owning `UnitOfWork`.

use super::error::StoreError;
use rusqlite::{params, params_from_iter, types::Value, Connection, Transaction};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Parent navigation of an entity: the referenced table and the foreign key
/// column on the entity's own table.
#[derive(Debug, Clone, Copy)]
pub struct Navigation {
    pub table: &'static str,
    pub fk_column: &'static str,
}

/// Storage mapping for one entity type.
pub trait Entity: Clone + Send + 'static {
    const TABLE: &'static str;
    /// Column names after `id`, in declaration order. Insert parameters and
    /// decoded rows follow this order.
    const FIELDS: &'static [&'static str];
    const PARENT: Option<Navigation>;
    /// Navigations that can be eagerly loaded for this entity.
    type Include: Copy + Send;

    fn id(&self) -> i64;
    fn assign_id(&mut self, id: i64);
    /// Decode from a row selected as `id, FIELDS...`.
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self>;
    /// Values for `FIELDS`, in the same order.
    fn field_values(&self) -> Vec<Value>;
    /// Populate the requested navigation on every item, batching parent
    /// lookups into a single query.
    fn load_navigation(
        conn: &Connection,
        items: &mut [Self],
        include: Self::Include,
    ) -> Result<(), StoreError>;
}

/// A filter operand.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Flag(bool),
}

impl FieldValue {
    fn into_sql(self) -> Value {
        match self {
            FieldValue::Integer(i) => Value::Integer(i),
            FieldValue::Real(r) => Value::Real(r),
            FieldValue::Text(t) => Value::Text(t),
            FieldValue::Flag(f) => Value::Integer(f as i64),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Typed row predicate, compiled into a parameterized `WHERE` clause.
///
/// Column names come from the constants the entity models export, so
/// services never carry SQL text.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Column on the entity's own table equals the value.
    Eq(&'static str, FieldValue),
    /// Column on the entity's own table is within the inclusive range.
    Between(&'static str, FieldValue, FieldValue),
    /// Column on the entity's parent row equals the value. Joins the parent
    /// table through the entity's navigation.
    ParentEq(&'static str, FieldValue),
}

/// Deterministic orderings a caller can request.
#[derive(Debug, Clone, Copy)]
pub enum SortKey {
    IdAscending,
}

/// Ticket for an insert staged on a repository. Redeemable for the committed
/// entity (with its assigned id) once the unit of work has saved.
#[derive(Debug, Clone, Copy)]
pub struct StagedInsert {
    index: usize,
}

enum Pending<T> {
    Insert(T),
    Update(T),
}

/// Query and mutation surface for one entity type.
///
/// Reads go straight to the store; writes are staged until the owning
/// `UnitOfWork` commits them in a single transaction.
pub struct Repository<T: Entity> {
    conn: Arc<Mutex<Connection>>,
    pending: Vec<Pending<T>>,
    committed: Vec<T>,
}

fn select_columns<T: Entity>() -> String {
    let mut columns = vec![format!("{}.id", T::TABLE)];
    columns.extend(T::FIELDS.iter().map(|f| format!("{}.{}", T::TABLE, f)));
    columns.join(", ")
}

/// Fetch parent rows for a set of foreign keys in one `IN` query,
/// keyed by id.
pub(super) fn parents_by_id<P: Entity>(
    conn: &Connection,
    mut ids: Vec<i64>,
) -> Result<HashMap<i64, P>, StoreError> {
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = (1..=ids.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {} FROM {} WHERE {}.id IN ({})",
        select_columns::<P>(),
        P::TABLE,
        P::TABLE,
        placeholders
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(ids.iter().map(|id| Value::Integer(*id))), |row| {
        P::from_row(row)
    })?;

    let mut parents = HashMap::new();
    for parent in rows {
        let parent = parent?;
        parents.insert(parent.id(), parent);
    }
    Ok(parents)
}

impl<T: Entity> Repository<T> {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Repository {
            conn,
            pending: Vec::new(),
            committed: Vec::new(),
        }
    }

    /// Fetch rows matching the filter (all rows when absent), in the
    /// requested order (store order when absent), with the named navigation
    /// eagerly loaded when `include` is given. An absent include leaves
    /// navigation references unpopulated.
    pub fn get_all(
        &self,
        filter: Option<Filter>,
        sort: Option<SortKey>,
        include: Option<T::Include>,
    ) -> Result<Vec<T>, StoreError> {
        let mut join = String::new();
        let mut condition = String::new();
        let mut values: Vec<Value> = Vec::new();

        match filter {
            None => {}
            Some(Filter::Eq(column, value)) => {
                condition = format!("{}.{} = ?1", T::TABLE, column);
                values.push(value.into_sql());
            }
            Some(Filter::Between(column, low, high)) => {
                condition = format!("{}.{} BETWEEN ?1 AND ?2", T::TABLE, column);
                values.push(low.into_sql());
                values.push(high.into_sql());
            }
            Some(Filter::ParentEq(column, value)) => {
                let nav = T::PARENT.ok_or(StoreError::NoNavigation { table: T::TABLE })?;
                join = format!(
                    " JOIN {} ON {}.{} = {}.id",
                    nav.table,
                    T::TABLE,
                    nav.fk_column,
                    nav.table
                );
                condition = format!("{}.{} = ?1", nav.table, column);
                values.push(value.into_sql());
            }
        }

        let mut sql = format!("SELECT {} FROM {}{}", select_columns::<T>(), T::TABLE, join);
        if !condition.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&condition);
        }
        if let Some(SortKey::IdAscending) = sort {
            sql.push_str(&format!(" ORDER BY {}.id ASC", T::TABLE));
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&sql)?;
        let mut items = stmt
            .query_map(params_from_iter(values), |row| T::from_row(row))?
            .collect::<Result<Vec<T>, _>>()?;

        if let Some(include) = include {
            T::load_navigation(&conn, &mut items, include)?;
        }
        Ok(items)
    }

    /// Point lookup by primary key.
    pub fn find(&self, id: i64) -> Result<Option<T>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}.id = ?1",
            select_columns::<T>(),
            T::TABLE,
            T::TABLE
        );
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(&sql)?;
        match stmt.query_row(params![id], |row| T::from_row(row)) {
            Ok(entity) => Ok(Some(entity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Stage an insert. The primary key is not populated until the unit of
    /// work commits; redeem the ticket with [`created`](Self::created)
    /// afterwards.
    pub fn add(&mut self, entity: T) -> StagedInsert {
        let inserts_staged = self
            .pending
            .iter()
            .filter(|op| matches!(op, Pending::Insert(_)))
            .count();
        let ticket = StagedInsert {
            index: self.committed.len() + inserts_staged,
        };
        self.pending.push(Pending::Insert(entity));
        ticket
    }

    /// Stage a full-row replace keyed by the entity's id. Saving fails with
    /// [`StoreError::RowNotFound`] if the id does not exist.
    pub fn update(&mut self, entity: T) {
        self.pending.push(Pending::Update(entity));
    }

    /// The committed entity behind a staged insert, id assigned.
    pub fn created(&self, staged: StagedInsert) -> Result<T, StoreError> {
        self.committed
            .get(staged.index)
            .cloned()
            .ok_or(StoreError::NotCommitted)
    }

    /// Execute every staged operation against an open transaction, in
    /// staging order. Called by the unit of work during `save`.
    pub(super) fn apply_pending(&mut self, tx: &Transaction) -> Result<(), StoreError> {
        for op in self.pending.drain(..) {
            match op {
                Pending::Insert(mut entity) => {
                    let placeholders = (1..=T::FIELDS.len())
                        .map(|i| format!("?{}", i))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let sql = format!(
                        "INSERT INTO {} ({}) VALUES ({})",
                        T::TABLE,
                        T::FIELDS.join(", "),
                        placeholders
                    );
                    tx.execute(&sql, params_from_iter(entity.field_values()))?;
                    entity.assign_id(tx.last_insert_rowid());
                    self.committed.push(entity);
                }
                Pending::Update(entity) => {
                    let assignments = T::FIELDS
                        .iter()
                        .enumerate()
                        .map(|(i, field)| format!("{} = ?{}", field, i + 1))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let sql = format!(
                        "UPDATE {} SET {} WHERE id = ?{}",
                        T::TABLE,
                        assignments,
                        T::FIELDS.len() + 1
                    );
                    let mut values = entity.field_values();
                    values.push(Value::Integer(entity.id()));
                    let changed = tx.execute(&sql, params_from_iter(values))?;
                    if changed == 0 {
                        return Err(StoreError::RowNotFound {
                            table: T::TABLE,
                            id: entity.id(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
