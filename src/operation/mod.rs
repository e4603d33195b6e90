mod builder;
mod foreign_key;
mod index;
mod sql;
mod table;

pub use builder::{TableBuilder, TableMode, TableOptions};
pub use foreign_key::{ForeignKey, ReferenceDef, ReferentialAction};
pub use index::{Index, IndexDef};
pub use sql::RunSql;
pub use table::{CreateTable, DropTable};

/// A schema change that renders its forward and reverse DDL.
///
/// Implementations must keep the pair symmetric: running `up()` and then
/// `down()` against a matching schema restores its previous shape.
pub trait Operation: Send + Sync {
    fn up(&self) -> Vec<String>;

    fn down(&self) -> Vec<String>;

    fn describe(&self) -> String;

    fn is_reversible(&self) -> bool {
        true
    }
}
