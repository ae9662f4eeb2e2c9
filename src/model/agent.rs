//! Agent records: the people cars are assigned to.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::fields::{Synonyms, pick};

const ID: Synonyms = &["id", "userid", "userId"];
const NAME: Synonyms = &["name", "fullName", "full_name"];
const USERNAME: Synonyms = &["username", "userName"];

/// An agent as listed by the backend.
///
/// `name` falls back to `username` when the backend leaves it out, so it is
/// empty only when both are missing. It is stored as received; callers
/// decide when to run it through [`crate::text::recover`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Agent {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        let username = pick(fields, USERNAME);
        let name = pick(fields, NAME)
            .or_else(|| username.clone())
            .unwrap_or_default();

        Self {
            id: pick(fields, ID).unwrap_or_default(),
            name,
            username,
        }
    }
}

impl<'de> Deserialize<'de> for Agent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        Ok(Self::from_fields(&fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn numeric_id_becomes_string() {
        let agent: Agent = serde_json::from_value(json!({ "id": 7, "name": "Omar" })).unwrap();
        assert_eq!(agent.id, "7");
        assert_eq!(agent.name, "Omar");
        assert_eq!(agent.username, None);
    }

    #[test]
    fn name_falls_back_to_username() {
        let agent: Agent =
            serde_json::from_value(json!({ "id": "3", "username": "omar.k" })).unwrap();
        assert_eq!(agent.name, "omar.k");
        assert_eq!(agent.username.as_deref(), Some("omar.k"));
    }

    #[test]
    fn null_name_falls_back_to_username() {
        let agent: Agent =
            serde_json::from_value(json!({ "id": "3", "name": null, "username": "omar.k" }))
                .unwrap();
        assert_eq!(agent.name, "omar.k");
    }

    #[test]
    fn missing_everything_yields_empty_fields() {
        let agent: Agent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(agent, Agent::default());
    }

    #[test]
    fn rejects_non_objects() {
        assert!(serde_json::from_value::<Agent>(json!("omar")).is_err());
    }

    #[test]
    fn decodes_a_listing() {
        let agents: Vec<Agent> = serde_json::from_str(
            r#"[{"id": 1, "name": "Ù…Ø«Ø§Ù„"}, {"id": "2", "username": "sara"}]"#,
        )
        .unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].name, "Ù…Ø«Ø§Ù„");
        assert_eq!(agents[1].name, "sara");
    }
}
