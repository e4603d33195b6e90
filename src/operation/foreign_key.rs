use std::fmt;

/// Action taken on referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferentialAction {
    #[default]
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

impl ReferentialAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Restrict => "restrict",
            ReferentialAction::Cascade => "cascade",
            ReferentialAction::SetNull => "set null",
            ReferentialAction::SetDefault => "set default",
            ReferentialAction::NoAction => "no action",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub fields: Vec<String>,
    pub table: String,
    pub references: Vec<String>,
    pub on_delete: ReferentialAction,
    pub primary: bool,
}

impl ForeignKey {
    pub fn new(
        fields: Vec<String>,
        table: impl Into<String>,
        references: Vec<String>,
        on_delete: ReferentialAction,
    ) -> Self {
        Self {
            fields,
            table: table.into(),
            references,
            on_delete,
            primary: false,
        }
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// Table-body fragment:
    /// `FOREIGN KEY (f1, f2) REFERENCES table (rf1, rf2) ON DELETE <action>`.
    pub fn to_sql(&self) -> String {
        format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
            self.fields.join(", "),
            self.table,
            self.references.join(", "),
            self.on_delete
        )
    }
}

/// Arguments of `references`: a `bigint NOT NULL` column pointing at `id`
/// unless told otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDef {
    pub name: Option<String>,
    pub on_delete: ReferentialAction,
    pub sql_type: String,
    pub nullable: bool,
    pub foreign_key_field: String,
    pub primary: bool,
}

impl Default for ReferenceDef {
    fn default() -> Self {
        Self {
            name: None,
            on_delete: ReferentialAction::Restrict,
            sql_type: "bigint".to_string(),
            nullable: false,
            foreign_key_field: "id".to_string(),
            primary: false,
        }
    }
}

impl ReferenceDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = sql_type.into();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn foreign_key_field(mut self, field: impl Into<String>) -> Self {
        self.foreign_key_field = field.into();
        self
    }

    /// Make the reference column the table's primary key. Meant for tables
    /// built with [`TableOptions::without_id`](crate::operation::TableOptions::without_id);
    /// the implicit `id` column would otherwise be a second `PRIMARY KEY`.
    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}
