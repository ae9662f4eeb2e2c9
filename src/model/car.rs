//! Car records: one imported vehicle and its logistics fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lifecycle::LifecycleInput;
use crate::text::recover_field;

use super::fields::{Synonyms, pick};

const ID: Synonyms = &["id", "carId", "car_id"];
const MAKE: Synonyms = &["make", "brand", "brandName", "brand_name"];
const MODEL: Synonyms = &["model", "modelName", "model_name"];
const YEAR: Synonyms = &["year", "makingYear", "making_year"];
const VIN: Synonyms = &["vin"];
const STATUS: Synonyms = &["status"];
const ETA: Synonyms = &["eta"];
const CONTAINER_NUMBER: Synonyms = &["containerNumber", "container_number", "container"];
const WAREHOUSE_DATE: Synonyms = &["warehouseDate", "warehouse_date"];
const PURCHASE_DATE: Synonyms = &["purchaseDate", "purchase_date"];
const DESTINATION: Synonyms = &["destination"];
const TERMINAL: Synonyms = &["terminal", "terminalName", "terminal_name"];
const AGENT_ID: Synonyms = &["agent_id", "agentId", "userid", "userId"];
const AGENT_NAME: Synonyms = &["agent_name", "agentName", "agent_username", "agentUsername"];
const LOT: Synonyms = &["lot"];
const COLOR: Synonyms = &["color"];
const IMAGE: Synonyms = &["image"];
const NOTE: Synonyms = &["note"];

/// A tracked vehicle, as listed by the backend.
///
/// Text fields are kept exactly as received, mojibake included. Recovery
/// happens at display time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Car {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            id: pick(fields, ID).unwrap_or_default(),
            make: pick(fields, MAKE),
            model: pick(fields, MODEL),
            year: pick(fields, YEAR),
            vin: pick(fields, VIN),
            status: pick(fields, STATUS),
            eta: pick(fields, ETA),
            container_number: pick(fields, CONTAINER_NUMBER),
            warehouse_date: pick(fields, WAREHOUSE_DATE),
            purchase_date: pick(fields, PURCHASE_DATE),
            destination: pick(fields, DESTINATION),
            terminal: pick(fields, TERMINAL),
            agent_id: pick(fields, AGENT_ID),
            agent_name: pick(fields, AGENT_NAME),
            lot: pick(fields, LOT),
            color: pick(fields, COLOR),
            image: pick(fields, IMAGE),
            note: pick(fields, NOTE),
        }
    }

    /// The three fields that decide this car's lifecycle stage.
    pub fn lifecycle(&self) -> LifecycleInput<'_> {
        LifecycleInput {
            purchase_date: self.purchase_date.as_deref(),
            warehouse_date: self.warehouse_date.as_deref(),
            container_number: self.container_number.as_deref(),
        }
    }

    /// Whether this car matches a free-text list search.
    ///
    /// Case-insensitive substring match over the recovered VIN, lot,
    /// container, destination, model, make, status, terminal, ETA, and
    /// color. A blank query matches every car.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let haystack = [
            &self.vin,
            &self.lot,
            &self.container_number,
            &self.destination,
            &self.model,
            &self.make,
            &self.status,
            &self.terminal,
            &self.eta,
            &self.color,
        ]
        .into_iter()
        .map(|field| recover_field(field.as_deref()).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

        haystack.contains(&query)
    }
}

impl<'de> Deserialize<'de> for Car {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        Ok(Self::from_fields(&fields))
    }
}
