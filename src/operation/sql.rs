use crate::operation::Operation;

/// Raw statements with optional reverse statements.
#[derive(Debug, Clone)]
pub struct RunSql {
    forward: Vec<String>,
    backward: Option<Vec<String>>,
    description: String,
}

impl RunSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self::multiple(vec![sql.into()])
    }

    pub fn multiple(sqls: Vec<String>) -> Self {
        Self {
            forward: sqls,
            backward: None,
            description: "Run custom SQL".to_string(),
        }
    }

    pub fn reversible(forward: impl Into<String>, backward: impl Into<String>) -> Self {
        Self::new(forward).with_reverse(backward)
    }

    pub fn with_reverse(self, sql: impl Into<String>) -> Self {
        self.with_reverse_multiple(vec![sql.into()])
    }

    pub fn with_reverse_multiple(mut self, sqls: Vec<String>) -> Self {
        self.backward = Some(sqls);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Operation for RunSql {
    fn up(&self) -> Vec<String> {
        self.forward.clone()
    }

    /// Empty when no reverse statements were given; see `is_reversible`.
    fn down(&self) -> Vec<String> {
        self.backward.clone().unwrap_or_default()
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn is_reversible(&self) -> bool {
        self.backward.is_some()
    }
}
