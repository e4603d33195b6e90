pub mod column;
pub mod direction;
pub mod error;
pub mod expression;
pub mod inflect;
pub mod migration;
pub mod operation;

pub mod prelude {
    pub use crate::column::{Column, ColumnDef, ColumnDefault, ColumnType};
    pub use crate::direction::Direction;
    pub use crate::error::SchemaError;
    pub use crate::expression::{ColumnRef, Expression, InSubquery, Raw, ToSql};
    pub use crate::migration::{Migration, MigrationRegistry, RenderedMigration, Schema};
    pub use crate::operation::{
        CreateTable, DropTable, ForeignKey, Index, IndexDef, Operation, ReferenceDef,
        ReferentialAction, RunSql, TableBuilder, TableMode, TableOptions,
    };
}
