//! Display projection: what a list row shows for a car.
//!
//! Every text field goes through [`recover`](crate::text::recover) right
//! before display. An agent name that is still corrupted afterwards falls
//! back to a name lookup, typically an [`AgentDirectory`](crate::directory::AgentDirectory).

use serde::Serialize;

use crate::lifecycle::{LifecycleStage, classify};
use crate::model::Car;
use crate::text::{Direction, looks_corrupted, recover_field};

/// A car, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarView {
    pub id: String,
    /// Brand, model, and year, space-separated, skipping blanks.
    pub title: String,
    pub brand: String,
    pub model: String,
    pub destination: String,
    pub agent: String,
    pub stage: LifecycleStage,
    /// Layout direction of the agent name.
    pub direction: Direction,
}

impl CarView {
    /// Project `car` for display, using `lookup` to name agents whose
    /// recorded name can't be recovered.
    pub fn build(car: &Car, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let brand = recover_field(car.make.as_deref());
        let model = recover_field(car.model.as_deref());
        let year = recover_field(car.year.as_deref());
        let title = [brand.as_str(), model.as_str(), year.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let agent = agent_name(car, lookup);

        Self {
            id: car.id.clone(),
            title,
            brand,
            model,
            destination: recover_field(car.destination.as_deref()),
            direction: Direction::of(&agent),
            agent,
            stage: classify(&car.lifecycle()),
        }
    }
}

/// The agent name to show for `car`.
///
/// The recovered `agent_name`, unless it is blank or still looks corrupted
/// and `lookup` knows the car's agent id.
pub fn agent_name(car: &Car, lookup: impl Fn(&str) -> Option<String>) -> String {
    let recovered = recover_field(car.agent_name.as_deref());
    if !needs_fallback(&recovered) {
        return recovered;
    }
    car.agent_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .and_then(lookup)
        .unwrap_or(recovered)
}

/// Whether any car would consult the agent lookup.
///
/// Lets callers skip loading the directory when nothing needs it.
pub fn needs_directory<'a>(cars: impl IntoIterator<Item = &'a Car>) -> bool {
    cars.into_iter().any(|car| {
        car.agent_id.as_deref().is_some_and(|id| !id.is_empty())
            && needs_fallback(&recover_field(car.agent_name.as_deref()))
    })
}

fn needs_fallback(name: &str) -> bool {
    name.is_empty() || looks_corrupted(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_lookup(_: &str) -> Option<String> {
        None
    }

    fn lookup(id: &str) -> Option<String> {
        (id == "9").then(|| "سارة".to_string())
    }

    fn car_with_agent(id: Option<&str>, name: Option<&str>) -> Car {
        Car {
            id: "1".into(),
            agent_id: id.map(String::from),
            agent_name: name.map(String::from),
            ..Car::default()
        }
    }

    // ── Agent name ──

    #[test]
    fn clean_agent_name_is_used() {
        let car = car_with_agent(Some("9"), Some(" Omar "));
        assert_eq!(agent_name(&car, lookup), "Omar");
    }

    #[test]
    fn recoverable_agent_name_is_repaired() {
        let car = car_with_agent(Some("9"), Some("Ù…Ø«Ø§Ù„"));
        assert_eq!(agent_name(&car, lookup), "مثال");
    }

    #[test]
    fn corrupted_agent_name_falls_back_to_lookup() {
        // Lone lead byte: no decoding helps.
        let car = car_with_agent(Some("9"), Some("Ã"));
        assert_eq!(agent_name(&car, lookup), "سارة");
    }

    #[test]
    fn missing_agent_name_falls_back_to_lookup() {
        let car = car_with_agent(Some("9"), None);
        assert_eq!(agent_name(&car, lookup), "سارة");
    }

    #[test]
    fn unknown_agent_keeps_best_effort_name() {
        let car = car_with_agent(Some("10"), Some("Ã"));
        assert_eq!(agent_name(&car, lookup), "Ã");

        let car = car_with_agent(None, Some("Ã"));
        assert_eq!(agent_name(&car, lookup), "Ã");

        let car = car_with_agent(Some(""), None);
        assert_eq!(agent_name(&car, no_lookup), "");
    }

    // ── Directory need ──

    #[test]
    fn directory_needed_only_for_unrecoverable_names_with_ids() {
        assert!(!needs_directory(std::iter::empty()));
        assert!(!needs_directory(&[car_with_agent(Some("9"), Some("Omar"))]));
        assert!(!needs_directory(&[car_with_agent(Some("9"), Some("Ù…Ø«Ø§Ù„"))]));
        assert!(!needs_directory(&[car_with_agent(None, Some("Ã"))]));
        assert!(needs_directory(&[
            car_with_agent(Some("9"), Some("Omar")),
            car_with_agent(Some("9"), Some("Ã")),
        ]));
        assert!(needs_directory(&[car_with_agent(Some("9"), None)]));
    }

    // ── Full view ──

    #[test]
    fn builds_full_view() {
        let car = Car {
            id: "42".into(),
            make: Some("Toyota".into()),
            model: Some(" Camry".into()),
            year: Some("2019".into()),
            destination: Some("Ø¯Ø¨ÙŠ".into()),
            agent_id: Some("9".into()),
            agent_name: Some("Ã".into()),
            warehouse_date: Some("2025-02-01".into()),
            ..Car::default()
        };

        let view = CarView::build(&car, lookup);

        assert_eq!(
            view,
            CarView {
                id: "42".into(),
                title: "Toyota Camry 2019".into(),
                brand: "Toyota".into(),
                model: "Camry".into(),
                destination: "دبي".into(),
                agent: "سارة".into(),
                stage: LifecycleStage::Warehouse,
                direction: Direction::Rtl,
            }
        );
    }

    #[test]
    fn title_skips_blank_parts() {
        let car = Car {
            make: Some("Lexus".into()),
            model: Some("  ".into()),
            year: Some("2021".into()),
            ..Car::default()
        };
        assert_eq!(CarView::build(&car, no_lookup).title, "Lexus 2021");
        assert_eq!(CarView::build(&Car::default(), no_lookup).title, "");
    }

    #[test]
    fn latin_agent_reads_left_to_right() {
        let car = car_with_agent(Some("1"), Some("Omar"));
        let view = CarView::build(&car, no_lookup);
        assert_eq!(view.direction, Direction::Ltr);
        assert_eq!(view.stage, LifecycleStage::Unclassified);
    }

    #[test]
    fn serializes_camel_case() {
        let view = CarView::build(&car_with_agent(None, Some("Omar")), no_lookup);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["agent"], "Omar");
        assert_eq!(value["stage"], "unclassified");
        assert_eq!(value["direction"], "ltr");
    }
}
