use tracing::{debug, trace};

use crate::column::{Column, ColumnDef, ColumnDefault, TIMESTAMP};
use crate::error::{Result, SchemaError};
use crate::inflect::singularize;
use crate::operation::{ForeignKey, Index, IndexDef, Operation, ReferenceDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    Create,
    Alter,
}

/// Table-wide settings fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Prepend an `id` primary key column.
    pub id: bool,
    pub id_type: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            id: true,
            id_type: "bigint".to_string(),
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_id(mut self) -> Self {
        self.id = false;
        self
    }

    pub fn id_type(mut self, sql_type: impl Into<String>) -> Self {
        self.id_type = sql_type.into();
        self
    }
}

/// Accumulates the columns, indexes and foreign keys of one new table and
/// renders them as DDL.
///
/// Declaration order is kept as given: columns and foreign keys form the
/// table body, indexes follow the `CREATE TABLE` statement in the order they
/// were declared.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    create: bool,
    columns: Vec<Column>,
    indexes: Vec<Index>,
    foreign_keys: Vec<ForeignKey>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>, mode: TableMode) -> Result<Self> {
        Self::with_options(name, mode, TableOptions::default())
    }

    /// Fails with [`SchemaError::NotImplemented`] for anything but
    /// [`TableMode::Create`].
    pub fn with_options(
        name: impl Into<String>,
        mode: TableMode,
        options: TableOptions,
    ) -> Result<Self> {
        let name = name.into();

        if mode != TableMode::Create {
            return Err(SchemaError::NotImplemented(format!(
                "altering table {}",
                name
            )));
        }

        Ok(Self::build(name, options))
    }

    /// Builder for a new table with the default `id` column.
    pub fn create(name: impl Into<String>) -> Self {
        Self::build(name.into(), TableOptions::default())
    }

    pub fn create_with(name: impl Into<String>, options: TableOptions) -> Self {
        Self::build(name.into(), options)
    }

    fn build(name: String, options: TableOptions) -> Self {
        let mut builder = Self {
            name,
            create: true,
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        };

        if options.id {
            builder.add_column(ColumnDef::new("id", options.id_type).primary_key());
        }

        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_create(&self) -> bool {
        self.create
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Append a column. A `unique` column also gets a unique index; otherwise
    /// an `index` column gets a plain one.
    pub fn add_column(&mut self, def: ColumnDef) -> &mut Self {
        let index = if def.unique {
            Some(IndexDef::new(def.name.as_str()).unique())
        } else if def.index {
            Some(IndexDef::new(def.name.as_str()))
        } else {
            None
        };

        self.columns.push(def.into_column());

        if let Some(index) = index {
            self.add_index(index);
        }

        self
    }

    /// Declare a column through a type shorthand (`string`, `long`, ...).
    /// Unknown shorthands are used as the literal column type.
    pub fn column(&mut self, kind: &str, name: impl Into<String>) -> &mut Self {
        self.add_column(ColumnDef::of(kind, name))
    }

    pub fn string(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("string", name)
    }

    pub fn integer(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("integer", name)
    }

    pub fn int32(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("int32", name)
    }

    pub fn int64(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("int64", name)
    }

    pub fn long(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("long", name)
    }

    pub fn datetime(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("datetime", name)
    }

    pub fn datetimetz(&mut self, name: impl Into<String>) -> &mut Self {
        self.column("datetimetz", name)
    }

    pub fn add_foreign_key(&mut self, foreign_key: ForeignKey) -> &mut Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn add_index(&mut self, index: impl Into<IndexDef>) -> &mut Self {
        let index = index.into().resolve(&self.name);
        self.indexes.push(index);
        self
    }

    /// Alias of [`TableBuilder::add_index`].
    pub fn index(&mut self, index: impl Into<IndexDef>) -> &mut Self {
        self.add_index(index)
    }

    /// Add an indexed column pointing at `table`, plus its foreign key.
    ///
    /// The column is named `<singular table>_id` unless `def` names it.
    pub fn references(&mut self, table: &str, def: ReferenceDef) -> &mut Self {
        let column = def
            .name
            .unwrap_or_else(|| format!("{}_id", singularize(table)));

        self.add_column(
            ColumnDef::new(column.as_str(), def.sql_type)
                .nullable(def.nullable)
                .primary(def.primary)
                .index(),
        );
        self.add_foreign_key(
            ForeignKey::new(vec![column], table, vec![def.foreign_key_field], def.on_delete)
                .primary(def.primary),
        )
    }

    /// `created_at` and `updated_at`, both defaulting to `now()` and indexed.
    pub fn timestamps(&mut self, nullable: bool) -> &mut Self {
        for name in ["created_at", "updated_at"] {
            self.add_column(
                ColumnDef::new(name, TIMESTAMP)
                    .nullable(nullable)
                    .default(ColumnDefault::now())
                    .index(),
            );
        }
        self
    }

    fn body(&self) -> String {
        let parts: Vec<String> = self
            .columns
            .iter()
            .map(Column::to_sql)
            .chain(self.foreign_keys.iter().map(ForeignKey::to_sql))
            .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!(" ({})", parts.join(", "))
        }
    }
}

impl Operation for TableBuilder {
    fn up(&self) -> Vec<String> {
        let mut statements = Vec::with_capacity(self.indexes.len() + 1);

        if self.create {
            statements.push(format!("CREATE TABLE {}{}", self.name, self.body()));
        }

        statements.extend(self.indexes.iter().map(|index| index.to_sql(&self.name)));

        debug!(table = %self.name, statements = statements.len(), "rendered table up");
        for sql in &statements {
            trace!(table = %self.name, %sql);
        }

        statements
    }

    fn down(&self) -> Vec<String> {
        let mut statements = Vec::new();

        if self.create {
            statements.push(format!("DROP TABLE {}", self.name));
        }

        debug!(table = %self.name, statements = statements.len(), "rendered table down");
        statements
    }

    fn describe(&self) -> String {
        format!(
            "Create table {} ({} columns, {} indexes, {} foreign keys)",
            self.name,
            self.columns.len(),
            self.indexes.len(),
            self.foreign_keys.len()
        )
    }
}
