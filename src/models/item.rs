use serde::{Deserialize, Serialize};

/// An item as returned by `GET /containers/{id}/items/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub statement: String,
    #[serde(default)]
    pub actionable: bool,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub parent_container: Option<i64>,
}

impl Item {
    /// One-character status marker for list display.
    pub fn status_marker(&self) -> &'static str {
        if self.done {
            "x"
        } else if self.actionable {
            ">"
        } else {
            " "
        }
    }
}
