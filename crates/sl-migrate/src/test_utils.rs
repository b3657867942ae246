//! Recording in-memory store for exercising the executor without DuckDB.
//!
//! Databases are registered per thread under a location string, so
//! `open_and_run::<RecordingStore>(location, ..)` finds them the same way a
//! real store finds a file. Every call is counted in a shared [`StoreLog`].

use sl_core::TableName;
use sl_db::{ColumnDescriptor, DbError, DbResult, SchemaDescriptor, Store};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Calls observed by every handle opened on one mock database.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreLog {
    pub opens: usize,
    pub introspections: usize,
    /// Every statement passed to `execute`, accepted or not
    pub statements: Vec<String>,
    pub closes: usize,
}

/// Failure injection switches.
#[derive(Debug, Default, Clone)]
pub struct Faults {
    pub open: Option<String>,
    pub introspect: Option<String>,
    pub execute: Option<String>,
    pub close: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    tables: HashMap<String, (TableName, Vec<ColumnDescriptor>)>,
    log: StoreLog,
    faults: Faults,
}

/// Shared handle to one mock database.
#[derive(Debug, Clone, Default)]
pub struct MockDatabase {
    state: Rc<RefCell<MockState>>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with nullable columns of the given `(name, type)` pairs.
    pub fn with_table(self, table: &str, columns: &[(&str, &str)]) -> Self {
        let columns = columns
            .iter()
            .map(|(name, ty)| ColumnDescriptor::new(*name, *ty))
            .collect();
        self.state
            .borrow_mut()
            .tables
            .insert(table.to_ascii_lowercase(), (TableName::new(table), columns));
        self
    }

    pub fn with_faults(self, faults: Faults) -> Self {
        self.state.borrow_mut().faults = faults;
        self
    }

    /// Make this database reachable through `RecordingStore::open(location)`.
    pub fn register(self, location: &str) -> Self {
        REGISTRY.with(|r| r.borrow_mut().insert(location.to_string(), self.clone()));
        self
    }

    /// Open a handle directly, bypassing the registry.
    pub fn handle(&self) -> RecordingStore {
        self.state.borrow_mut().log.opens += 1;
        RecordingStore { db: self.clone() }
    }

    pub fn log(&self) -> StoreLog {
        self.state.borrow().log.clone()
    }

    /// Current column names of `table`, if it exists.
    pub fn column_names(&self, table: &str) -> Option<Vec<String>> {
        self.state
            .borrow()
            .tables
            .get(&table.to_ascii_lowercase())
            .map(|(_, cols)| cols.iter().map(|c| c.name.clone()).collect())
    }
}

thread_local! {
    static REGISTRY: RefCell<HashMap<String, MockDatabase>> = RefCell::new(HashMap::new());
}

/// A [`Store`] handle on a [`MockDatabase`].
#[derive(Debug)]
pub struct RecordingStore {
    db: MockDatabase,
}

impl Store for RecordingStore {
    fn open(location: &str) -> DbResult<Self> {
        let db = REGISTRY
            .with(|r| r.borrow().get(location).cloned())
            .ok_or_else(|| DbError::ConnectionError(format!("no mock database at {location}")))?;
        if let Some(msg) = db.state.borrow().faults.open.clone() {
            return Err(DbError::ConnectionError(msg));
        }
        Ok(db.handle())
    }

    fn introspect(&self, table: &TableName) -> DbResult<SchemaDescriptor> {
        let mut state = self.db.state.borrow_mut();
        state.log.introspections += 1;
        if let Some(msg) = state.faults.introspect.clone() {
            return Err(DbError::IntrospectionError {
                table: table.to_string(),
                message: msg,
            });
        }
        let found = state
            .tables
            .get(&table.to_ascii_lowercase())
            .map(|(name, cols)| SchemaDescriptor::new(name.clone(), cols.clone()));
        found.ok_or_else(|| DbError::TableNotFound(table.to_string()))
    }

    fn execute(&mut self, sql: &str) -> DbResult<usize> {
        let mut state = self.db.state.borrow_mut();
        state.log.statements.push(sql.to_string());
        if let Some(msg) = state.faults.execute.clone() {
            return Err(DbError::ExecutionError(msg));
        }
        if let Some((table, column, ty)) = parse_add_column(sql) {
            let (_, cols) = state
                .tables
                .get_mut(&table.to_ascii_lowercase())
                .ok_or_else(|| DbError::TableNotFound(table.clone()))?;
            if cols.iter().any(|c| c.matches_name(&column)) {
                return Err(DbError::ExecutionError(format!(
                    "Column with name {column} already exists"
                )));
            }
            cols.push(ColumnDescriptor::new(column, ty));
        }
        Ok(0)
    }

    fn close(self) -> DbResult<()> {
        let mut state = self.db.state.borrow_mut();
        state.log.closes += 1;
        let fault = state.faults.close.clone();
        match fault {
            Some(msg) => Err(DbError::CloseError(msg)),
            None => Ok(()),
        }
    }

    fn store_type(&self) -> &'static str {
        "recording"
    }
}

/// Understand the statements `MigrationSpec::statement` renders:
/// `ALTER TABLE "t" ADD COLUMN "c" TYPE [DEFAULT ..]`.
fn parse_add_column(sql: &str) -> Option<(String, String, String)> {
    let rest = sql.strip_prefix("ALTER TABLE ")?;
    let (table, rest) = rest.split_once(" ADD COLUMN ")?;
    let (column, rest) = rest.split_once("\" ")?;
    let ty = rest.split(" DEFAULT ").next()?.trim();
    Some((
        unquote(table),
        unquote(&format!("{column}\"")),
        ty.to_string(),
    ))
}

fn unquote(quoted: &str) -> String {
    quoted
        .split("\".\"")
        .map(|part| part.trim_matches('"').replace("\"\"", "\""))
        .collect::<Vec<_>>()
        .join(".")
}
