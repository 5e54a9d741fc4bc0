use pretty_assertions::assert_eq;

use ev_dashboard::data::aggregate::{aggregate_by_brand, aggregate_by_brand_key};
use ev_dashboard::data::filter::ModelSelection;
use ev_dashboard::data::loader::parse_csv;
use ev_dashboard::data::projection::project_scatter;
use ev_dashboard::labels::metric_label;
use ev_dashboard::state::DashboardState;
use ev_dashboard::units::convert;
use ev_dashboard::{Locale, Metric, Translations, UnitSystem};

const SAMPLE: &str = include_str!("../assets/ev_data.csv");

fn names(rows: &[ev_dashboard::data::aggregate::BrandAggregate]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn sample_drops_only_the_malformed_row() {
    let records = parse_csv(SAMPLE);
    assert_eq!(records.len(), 10);
    assert!(records.iter().all(|r| r.brand != "Broken"));

    let hyundai = records.iter().find(|r| r.brand == "Hyundai").unwrap();
    assert_eq!(hyundai.model, "Ioniq 5 Long Range");
    assert_eq!(hyundai.metric(Metric::RangeKm), Some(507.0));
    assert_eq!(hyundai.extra.get("car_body_type").map(String::as_str), Some("SUV"));

    let polestar = records.iter().find(|r| r.brand == "Polestar").unwrap();
    assert_eq!(polestar.metric(Metric::EfficiencyWhPerKm), None);
}

#[test]
fn range_ranking_over_sample() {
    let records = parse_csv(SAMPLE);
    let rows = aggregate_by_brand(&records, Metric::RangeKm);
    assert_eq!(names(&rows), vec!["Tesla", "Polestar", "Hyundai", "BYD", "Kia", "Fiat"]);
    assert_eq!(rows[0].selected_value, Some(605.0));
    assert_eq!(rows[0].models, 3);
}

#[test]
fn acceleration_ranking_over_sample() {
    let records = parse_csv(SAMPLE);
    let rows = aggregate_by_brand_key(&records, "acceleration_0_100_s").unwrap();
    assert_eq!(names(&rows), vec!["Tesla", "Polestar", "BYD", "Kia", "Hyundai", "Fiat"]);
    assert_eq!(rows[0].selected_value, Some(3.5));
}

#[test]
fn scatter_over_sample_applies_defaults_and_conversion() {
    let records = parse_csv(SAMPLE);
    let selection: ModelSelection = ["500e", "Model 3 Long Range"].into_iter().collect();
    let points = project_scatter(&records, &selection, UnitSystem::Imperial);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].model, "Model 3 Long Range");
    assert_eq!(points[0].range, convert("range_km", Some(560.0), UnitSystem::Imperial));
    assert_eq!(points[0].range, Some(348.0));
    assert_eq!(points[1].model, "500e");
    assert_eq!(points[1].drivetrain, "Other");
    assert_eq!(points[1].battery_capacity, Some(37.3));
}

#[test]
fn dashboard_json_shape() {
    let mut state = DashboardState::default();
    let ticket = state.begin_load();
    state.finish_load(ticket, Ok(SAMPLE.to_string()));
    state.selection.insert("Dolphin");

    let bar = serde_json::to_value(state.bar_chart().unwrap()).unwrap();
    assert_eq!(bar["metric"], "range_km");
    assert_eq!(bar["rows"][0]["name"], "Tesla");
    assert_eq!(bar["rows"][0]["selectedValue"], 605.0);
    assert_eq!(bar["rows"][0]["averages"]["range_km"], 605.0);

    let scatter = serde_json::to_value(state.scatter_plot().unwrap()).unwrap();
    assert_eq!(scatter["points"][0]["batteryCapacity"], 60.4);
    assert_eq!(scatter["points"][0]["drivetrain"], "FWD");
}

#[test]
fn labels_follow_locale_and_units() {
    let fr = Translations::new(Locale::Fr);
    assert_eq!(metric_label("torque_nm", UnitSystem::Imperial, &fr), "Couple (lb-ft)");
    assert_eq!(metric_label("unknown", UnitSystem::Imperial, &fr), "");
}
