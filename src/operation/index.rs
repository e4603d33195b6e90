use crate::inflect::index_name;

/// A single-field index declared on a table being built.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub field: String,
    pub name: String,
    pub using: Option<String>,
    pub unique: bool,
}

impl Index {
    pub fn to_sql(&self, table: &str) -> String {
        let mut sql = String::from("CREATE ");
        if self.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        sql.push_str(&self.name);
        sql.push_str(" ON ");
        sql.push_str(table);
        if let Some(ref method) = self.using {
            sql.push_str(" USING ");
            sql.push_str(method);
        }
        sql.push_str(" (");
        sql.push_str(&self.field);
        sql.push(')');
        sql
    }
}

/// Arguments of `add_index`. The name is derived from the table and field
/// when not given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexDef {
    pub field: String,
    pub name: Option<String>,
    pub using: Option<String>,
    pub unique: bool,
}

impl IndexDef {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Index method, e.g. `gin` or `btree`.
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.using = Some(method.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub(crate) fn resolve(self, table: &str) -> Index {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => index_name(table, &self.field),
        };

        Index {
            field: self.field,
            name,
            using: self.using,
            unique: self.unique,
        }
    }
}

impl From<&str> for IndexDef {
    fn from(field: &str) -> Self {
        IndexDef::new(field)
    }
}

impl From<String> for IndexDef {
    fn from(field: String) -> Self {
        IndexDef::new(field)
    }
}
