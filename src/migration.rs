use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::direction::Direction;
use crate::error::{Result, SchemaError};
use crate::operation::{DropTable, Operation, TableBuilder, TableMode, TableOptions};

type ChangeFn = dyn Fn(&mut Schema, Direction) -> Result<()> + Send + Sync;

/// Collects the operations a change description registers for one direction.
pub struct Schema {
    direction: Direction,
    operations: Vec<Box<dyn Operation>>,
    irreversible: Option<String>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("direction", &self.direction)
            .field(
                "operations",
                &self
                    .operations
                    .iter()
                    .map(|op| op.describe())
                    .collect::<Vec<_>>(),
            )
            .field("irreversible", &self.irreversible)
            .finish()
    }
}

impl Schema {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            operations: Vec::new(),
            irreversible: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn create_table<F>(&mut self, name: impl Into<String>, build: F) -> &mut Self
    where
        F: FnOnce(&mut TableBuilder),
    {
        self.create_table_with(name, TableOptions::default(), build)
    }

    pub fn create_table_with<F>(
        &mut self,
        name: impl Into<String>,
        options: TableOptions,
        build: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut TableBuilder),
    {
        let mut table = TableBuilder::create_with(name, options);
        build(&mut table);
        self.operation(table)
    }

    /// Always fails: only table creation is modeled.
    pub fn alter_table<F>(&mut self, name: impl Into<String>, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TableBuilder),
    {
        let mut table = TableBuilder::new(name, TableMode::Alter)?;
        build(&mut table);
        Ok(self.operation(table))
    }

    pub fn drop_table(&mut self, name: impl Into<String>) -> &mut Self {
        self.operation(DropTable::new(name))
    }

    pub fn operation(&mut self, op: impl Operation + 'static) -> &mut Self {
        self.operations.push(Box::new(op));
        self
    }

    /// Mark the enclosing migration as impossible to roll back.
    ///
    /// Usually called from a `down` block:
    /// `direction.down(|| schema.irreversible("drops data"))`.
    pub fn irreversible(&mut self, reason: impl Into<String>) {
        self.irreversible = Some(reason.into());
    }

    pub fn irreversible_reason(&self) -> Option<&str> {
        self.irreversible.as_deref()
    }

    /// Why this change cannot be rolled back: the irreversible guard
    /// first, then the first operation without a reverse.
    pub(crate) fn rollback_blocker(&self) -> Option<String> {
        if let Some(reason) = self.irreversible_reason() {
            return Some(reason.to_string());
        }
        self.operations
            .iter()
            .find(|op| !op.is_reversible())
            .map(|op| format!("{} has no reverse", op.describe()))
    }

    pub fn operations(&self) -> &[Box<dyn Operation>] {
        &self.operations
    }
}

pub struct Migration {
    pub version: u64,
    pub name: &'static str,
    change: Box<ChangeFn>,
}

impl std::fmt::Debug for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("version", &self.version)
            .field("name", &self.name)
            .finish()
    }
}

impl Migration {
    /// A migration whose `change` describes both directions at once; it is
    /// run once per direction and gates direction-specific logic through
    /// the [`Direction`] it receives.
    pub fn new<F>(version: u64, name: &'static str, change: F) -> Self
    where
        F: Fn(&mut Schema, Direction) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            version,
            name,
            change: Box::new(change),
        }
    }

    /// Run the change description for `direction` and return what it
    /// registered.
    pub fn describe(&self, direction: Direction) -> Result<Schema> {
        let mut schema = Schema::new(direction);
        (self.change)(&mut schema, direction)?;
        Ok(schema)
    }

    /// Forward statements, in registration order.
    pub fn up_sql(&self) -> Result<Vec<String>> {
        let schema = self.describe(Direction::Up)?;
        let statements: Vec<String> = schema
            .operations
            .iter()
            .flat_map(|op| op.up())
            .collect();

        debug!(
            migration = self.name,
            version = self.version,
            statements = statements.len(),
            "rendered migration up"
        );
        Ok(statements)
    }

    /// Reverse statements: each operation's `down()` in reverse
    /// registration order.
    pub fn down_sql(&self) -> Result<Vec<String>> {
        let schema = self.describe(Direction::Down)?;

        if let Some(reason) = schema.rollback_blocker() {
            warn!(
                migration = self.name,
                reason = %reason,
                "rollback requested for irreversible migration"
            );
            return Err(self.irreversible(reason));
        }

        let statements: Vec<String> = schema
            .operations
            .iter()
            .rev()
            .flat_map(|op| op.down())
            .collect();

        debug!(
            migration = self.name,
            version = self.version,
            statements = statements.len(),
            "rendered migration down"
        );
        Ok(statements)
    }

    /// Whether `down_sql` would succeed. Renders nothing.
    pub fn is_reversible(&self) -> bool {
        self.describe(Direction::Down)
            .map(|schema| schema.rollback_blocker().is_none())
            .unwrap_or(false)
    }

    fn irreversible(&self, reason: impl Into<String>) -> SchemaError {
        SchemaError::Irreversible {
            migration: self.name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Statements rendered for one migration in one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMigration {
    pub version: u64,
    pub name: &'static str,
    pub statements: Vec<String>,
}

/// Migrations keyed by version. Rendering only; executing the statements is
/// left to the caller.
#[derive(Debug, Default)]
pub struct MigrationRegistry {
    migrations: BTreeMap<u64, Migration>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, migration: Migration) -> Result<()> {
        if self.migrations.contains_key(&migration.version) {
            return Err(SchemaError::DuplicateVersion(migration.version));
        }
        self.migrations.insert(migration.version, migration);
        Ok(())
    }

    pub fn get(&self, version: u64) -> Option<&Migration> {
        self.migrations.get(&version)
    }

    /// All migrations, oldest first.
    pub fn all(&self) -> impl Iterator<Item = &Migration> {
        self.migrations.values()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Forward statements of every migration newer than `after`, oldest first.
    pub fn forward_plan(&self, after: Option<u64>) -> Result<Vec<RenderedMigration>> {
        self.migrations
            .values()
            .filter(|m| after.map_or(true, |after| m.version > after))
            .map(|m| -> Result<RenderedMigration> {
                Ok(RenderedMigration {
                    version: m.version,
                    name: m.name,
                    statements: m.up_sql()?,
                })
            })
            .collect()
    }

    /// Reverse statements newest first, down to and including `target`.
    /// Without a target every migration is rolled back.
    pub fn backward_plan(&self, target: Option<u64>) -> Result<Vec<RenderedMigration>> {
        if let Some(target) = target {
            if !self.migrations.contains_key(&target) {
                return Err(SchemaError::NotFound(target));
            }
        }

        self.migrations
            .values()
            .rev()
            .filter(|m| target.map_or(true, |target| m.version >= target))
            .map(|m| -> Result<RenderedMigration> {
                Ok(RenderedMigration {
                    version: m.version,
                    name: m.name,
                    statements: m.down_sql()?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDef;
    use crate::operation::{CreateTable, ReferenceDef, RunSql};
    use pretty_assertions::assert_eq;

    fn create_users() -> Migration {
        Migration::new(1, "create_users", |schema, _| {
            schema.create_table("users", |t| {
                t.add_column(ColumnDef::of("string", "email").not_null().unique());
            });
            Ok(())
        })
    }

    fn create_posts() -> Migration {
        Migration::new(2, "create_posts", |schema, _| {
            schema.create_table("posts", |t| {
                t.string("title").references("users", ReferenceDef::new());
            });
            Ok(())
        })
    }

    #[test]
    fn up_sql_in_registration_order() {
        let migration = Migration::new(1, "two_tables", |schema, _| {
            schema
                .operation(CreateTable::new("a"))
                .operation(CreateTable::new("b"));
            Ok(())
        });

        assert_eq!(
            migration.up_sql().unwrap(),
            vec!["CREATE TABLE a".to_string(), "CREATE TABLE b".to_string()]
        );
    }

    #[test]
    fn down_sql_in_reverse_registration_order() {
        let migration = Migration::new(1, "two_tables", |schema, _| {
            schema
                .operation(CreateTable::new("a"))
                .operation(CreateTable::new("b"));
            Ok(())
        });

        assert_eq!(
            migration.down_sql().unwrap(),
            vec!["DROP TABLE b".to_string(), "DROP TABLE a".to_string()]
        );
    }

    #[test]
    fn create_table_renders_builder() {
        let sql = create_users().up_sql().unwrap();
        assert_eq!(
            sql,
            vec![
                "CREATE TABLE users (id bigint PRIMARY KEY, email text NOT NULL)".to_string(),
                "CREATE UNIQUE INDEX users_email ON users (email)".to_string(),
            ]
        );
        assert_eq!(
            create_users().down_sql().unwrap(),
            vec!["DROP TABLE users".to_string()]
        );
    }

    #[test]
    fn change_sees_direction() {
        let migration = Migration::new(1, "seed", |schema, direction| {
            direction.up(|| {
                schema.operation(RunSql::new("INSERT INTO flags VALUES (1)"));
            });
            direction.down(|| {
                schema.operation(RunSql::new("DELETE FROM flags"));
            });
            Ok(())
        });

        assert_eq!(
            migration.up_sql().unwrap(),
            vec!["INSERT INTO flags VALUES (1)".to_string()]
        );
        assert_eq!(
            migration.describe(Direction::Down).unwrap().operations()[0].up(),
            vec!["DELETE FROM flags".to_string()]
        );
    }

    #[test]
    fn irreversible_guard_blocks_rollback() {
        let migration = Migration::new(3, "drop_legacy", |schema, direction| {
            schema.drop_table("legacy");
            direction.down(|| schema.irreversible("legacy rows are gone"));
            Ok(())
        });

        assert_eq!(migration.up_sql().unwrap(), vec!["DROP TABLE legacy".to_string()]);
        assert!(!migration.is_reversible());
        assert_eq!(
            migration.down_sql(),
            Err(SchemaError::Irreversible {
                migration: "drop_legacy".to_string(),
                reason: "legacy rows are gone".to_string(),
            })
        );
    }

    #[test]
    fn operation_without_reverse_blocks_rollback() {
        let migration = Migration::new(4, "purge", |schema, _| {
            schema.operation(
                RunSql::new("DELETE FROM sessions").with_description("Purge sessions"),
            );
            Ok(())
        });

        assert!(matches!(
            migration.down_sql(),
            Err(SchemaError::Irreversible { ref reason, .. }) if reason == "Purge sessions has no reverse"
        ));
    }

    #[test]
    fn reversibility_check_matches_rollback() {
        let reversible = create_users();
        assert!(reversible.is_reversible());
        assert!(reversible.down_sql().is_ok());

        let purge = Migration::new(6, "purge", |schema, _| {
            schema.operation(RunSql::new("DELETE FROM sessions"));
            Ok(())
        });
        let schema = purge.describe(Direction::Down).unwrap();
        assert!(schema.rollback_blocker().is_some());
        assert!(!purge.is_reversible());
        assert!(purge.down_sql().is_err());

        let guarded = Migration::new(7, "guarded", |schema, direction| {
            schema.drop_table("legacy");
            direction.down(|| schema.irreversible("legacy rows are gone"));
            Ok(())
        });
        let schema = guarded.describe(Direction::Down).unwrap();
        assert_eq!(
            schema.rollback_blocker(),
            Some("legacy rows are gone".to_string())
        );
        assert!(guarded.describe(Direction::Up).unwrap().rollback_blocker().is_none());
        assert!(!guarded.is_reversible());
    }

    #[test]
    fn alter_table_fails_the_migration() {
        let migration = Migration::new(5, "alter_users", |schema, _| {
            schema.alter_table("users", |t| {
                t.string("nickname");
            })?;
            Ok(())
        });

        assert!(matches!(
            migration.up_sql(),
            Err(SchemaError::NotImplemented(_))
        ));
        assert!(matches!(
            migration.down_sql(),
            Err(SchemaError::NotImplemented(_))
        ));
    }

    #[test]
    fn schema_debug_lists_operations() {
        let schema = create_users().describe(Direction::Up).unwrap();
        let debug = format!("{:?}", schema);
        assert!(debug.contains("Create table users"));
        assert!(debug.contains("Up"));
    }

    #[test]
    fn migration_debug() {
        let debug = format!("{:?}", create_users());
        assert!(debug.contains("create_users"));
        assert!(debug.contains("version: 1"));
    }

    #[test]
    fn registry_rejects_duplicate_version() {
        let mut registry = MigrationRegistry::new();
        registry.register(create_users()).unwrap();

        let duplicate = Migration::new(1, "other", |_, _| Ok(()));
        assert_eq!(
            registry.register(duplicate),
            Err(SchemaError::DuplicateVersion(1))
        );
    }

    #[test]
    fn registry_orders_by_version() {
        let mut registry = MigrationRegistry::new();
        registry.register(create_posts()).unwrap();
        registry.register(create_users()).unwrap();

        let names: Vec<_> = registry.all().map(|m| m.name).collect();
        assert_eq!(names, vec!["create_users", "create_posts"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.get(2).is_some());
        assert!(registry.get(9).is_none());
    }

    #[test]
    fn registry_forward_plan_skips_applied() {
        let mut registry = MigrationRegistry::new();
        registry.register(create_users()).unwrap();
        registry.register(create_posts()).unwrap();

        let all = registry.forward_plan(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].version, 1);

        let pending = registry.forward_plan(Some(1)).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "create_posts");
        assert!(pending[0].statements[0].starts_with("CREATE TABLE posts"));
    }

    #[test]
    fn registry_backward_plan_newest_first() {
        let mut registry = MigrationRegistry::new();
        registry.register(create_users()).unwrap();
        registry.register(create_posts()).unwrap();

        let plan = registry.backward_plan(None).unwrap();
        assert_eq!(
            plan.iter().map(|m| m.version).collect::<Vec<_>>(),
            vec![2, 1]
        );
        assert_eq!(plan[0].statements, vec!["DROP TABLE posts".to_string()]);

        let partial = registry.backward_plan(Some(2)).unwrap();
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn registry_backward_plan_unknown_target() {
        let registry = MigrationRegistry::new();
        assert_eq!(
            registry.backward_plan(Some(7)),
            Err(SchemaError::NotFound(7))
        );
    }

    #[test]
    fn registry_backward_plan_stops_at_irreversible() {
        let mut registry = MigrationRegistry::new();
        registry.register(create_users()).unwrap();
        registry
            .register(Migration::new(2, "drop_users", |schema, direction| {
                schema.drop_table("users");
                direction.down(|| schema.irreversible("data loss"));
                Ok(())
            }))
            .unwrap();

        assert!(matches!(
            registry.backward_plan(None),
            Err(SchemaError::Irreversible { .. })
        ));
    }
}
