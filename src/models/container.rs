use serde::{Deserialize, Serialize};

/// A container as returned by `GET /containers/`.
///
/// Containers form a tree via `parent_container`; the list endpoint
/// returns them flat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_on_actionables_tab: bool,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default)]
    pub parent_container: Option<i64>,
}

impl Container {
    pub fn is_top_level(&self) -> bool {
        self.parent_container.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container_list() {
        // Shape produced by the API's container serializer
        let json = r#"[
            {"id": 1, "name": "Inbox", "is_on_actionables_tab": true,
             "is_collapsed": false, "parent_container": null, "spectrum_types": []},
            {"id": 2, "name": "Someday", "is_on_actionables_tab": false,
             "is_collapsed": true, "parent_container": 1, "spectrum_types": []}
        ]"#;

        let containers: Vec<Container> = serde_json::from_str(json).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].name, "Inbox");
        assert!(containers[0].is_top_level());
        assert_eq!(containers[1].parent_container, Some(1));
        assert!(!containers[1].is_top_level());
    }
}
