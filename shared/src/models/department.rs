//! Department Model (部门)

use serde::{Deserialize, Serialize};

use super::Record;

/// Department record as stored in `departments.json`.
///
/// Reference data: created and edited by admin tooling outside this
/// server's scope, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl Record for Department {
    fn id(&self) -> i64 {
        self.id
    }
}
