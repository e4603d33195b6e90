use crate::operation::Operation;

/// Bare `CREATE TABLE` without any column detail.
#[derive(Debug, Clone)]
pub struct CreateTable {
    pub name: String,
}

impl CreateTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Operation for CreateTable {
    fn up(&self) -> Vec<String> {
        vec![format!("CREATE TABLE {}", self.name)]
    }

    fn down(&self) -> Vec<String> {
        vec![format!("DROP TABLE {}", self.name)]
    }

    fn describe(&self) -> String {
        format!("Create table {}", self.name)
    }
}

/// Inverse of [`CreateTable`]: drops going forward, recreates on rollback.
#[derive(Debug, Clone)]
pub struct DropTable {
    pub name: String,
}

impl DropTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Operation for DropTable {
    fn up(&self) -> Vec<String> {
        vec![format!("DROP TABLE {}", self.name)]
    }

    fn down(&self) -> Vec<String> {
        vec![format!("CREATE TABLE {}", self.name)]
    }

    fn describe(&self) -> String {
        format!("Drop table {}", self.name)
    }
}
