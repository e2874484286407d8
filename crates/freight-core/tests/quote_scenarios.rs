//! End-to-end quote scenarios against the built-in tariff.

use freight_core::surcharge::{classify_unit, SurchargeRules, SurchargeTier, UnitMeasure};
use freight_core::{
    CargoItem, Carrier, CostBreakdown, Engine, PackingType, QuoteInput, RateTables, TradeTerm,
};
use pretty_assertions::assert_eq;

fn request(items: Vec<CargoItem>) -> QuoteInput {
    QuoteInput {
        origin_country: "KR".to_string(),
        destination_country: "US".to_string(),
        destination_postal: "60601".to_string(),
        pickup_region: "SEOUL".to_string(),
        remote_pickup: false,
        trade_term: TradeTerm::Cif,
        packing_type: PackingType::None,
        carrier: Carrier::Ups,
        items,
        margin_pct: 20.0,
        duty_estimate: 0.0,
        fx_rate: 1_000.0,
        fuel_surcharge_pct: 10.0,
        manual_domestic_cost: None,
        manual_packing_cost: None,
    }
}

#[test]
fn zone_examples() {
    let engine = Engine::default();
    assert_eq!(engine.classify_zone("CN", "520000").label, "China - South");
    assert_eq!(engine.classify_zone("CN", "110000").label, "China - North/Other");
    assert_eq!(engine.classify_zone("US", "90210").key, "US_WEST");
    assert_eq!(engine.classify_zone("US", "60601").key, "US_CENTRAL");
    assert_eq!(engine.classify_zone("US", "").key, "US_EAST");
}

#[test]
fn over_max_unit_gets_only_the_over_max_rate() {
    let rules = SurchargeRules::default();
    let s = classify_unit(
        &UnitMeasure::new(300.0, 60.0, 60.0, 75.0),
        PackingType::WoodenBox,
        &rules,
    );
    assert_eq!(s.tier, Some(SurchargeTier::OverMax));
    assert_eq!(s.amount, rules.over_max_rate);
}

#[test]
fn full_breakdown_for_unpacked_parcel() {
    // 10 kg actual, 40×40×40 → 12.8 kg volumetric, billable 12.8
    let r = Engine::default().quote(&request(vec![CargoItem::new(40.0, 40.0, 40.0, 10.0, 1)]));

    let carrier_base = 12.8 * 12_500.0;
    let expected = CostBreakdown {
        domestic_base: 45_000.0,
        domestic_surcharge: 0.0,
        packing_material: 0.0,
        packing_labor: 0.0,
        packing_fumigation: 0.0,
        handling_fees: 35_000.0,
        carrier_base,
        carrier_fuel: carrier_base * 0.10,
        carrier_war_risk: carrier_base * 0.05,
        carrier_surcharge: 0.0,
        destination_duty: 0.0,
        total_cost: 45_000.0 + 35_000.0 + carrier_base * 1.15,
    };

    assert_eq!(r.billable_weight, 12.8);
    assert_eq!(r.applied_zone, "USA - Central");
    assert!((r.breakdown.total_cost - expected.total_cost).abs() < 1e-6);
    assert!((r.breakdown.carrier_fuel - expected.carrier_fuel).abs() < 1e-6);
    assert!((r.breakdown.carrier_war_risk - expected.carrier_war_risk).abs() < 1e-6);
    assert_eq!(
        (r.breakdown.domestic_base, r.breakdown.handling_fees, r.breakdown.carrier_base),
        (expected.domestic_base, expected.handling_fees, expected.carrier_base)
    );
    // The 40cm cube is more than 20% heavier volumetrically.
    assert_eq!(r.warnings.len(), 1);
    assert!(r.warnings[0].starts_with("Volumetric weight 12.8kg"));
}

#[test]
fn packed_vacuum_shipment() {
    let mut req = request(vec![
        CargoItem::new(50.0, 40.0, 30.0, 10.0, 1),
        CargoItem::new(50.0, 40.0, 30.0, 10.0, 1),
    ]);
    req.packing_type = PackingType::Vacuum;
    let r = Engine::default().quote(&req);

    // Grown to 60×50×45, 21kg each.
    assert!((r.actual_weight - 42.0).abs() < 1e-9);
    assert!((r.breakdown.packing_labor - 112_500.0).abs() < 1e-6);
    assert_eq!(r.breakdown.packing_fumigation, 50_000.0);
    let area = 2.0 * (60.0 * 50.0 + 60.0 * 45.0 + 50.0 * 45.0) / 10_000.0;
    assert!((r.breakdown.packing_material - area * 15_000.0 * 2.0).abs() < 1e-6);
}

#[test]
fn surcharges_use_packed_measurements() {
    let surcharge = |item: CargoItem, packing: PackingType| {
        let mut req = request(vec![item]);
        req.packing_type = packing;
        Engine::default().quote(&req)
    };

    // 115cm long side grows to 125cm, past the 122cm threshold.
    let long = CargoItem::new(115.0, 20.0, 10.0, 2.0, 1);
    assert_eq!(surcharge(long.clone(), PackingType::None).breakdown.carrier_surcharge, 0.0);
    let packed = surcharge(long, PackingType::Vacuum);
    assert_eq!(packed.breakdown.carrier_surcharge, 35_000.0);
    assert!(packed
        .warnings
        .iter()
        .any(|w| w.contains("longest side > 122cm")));

    // 14kg becomes 14 × 1.1 + 10 = 25.4kg, past the 25kg threshold.
    let heavy = CargoItem::new(30.0, 30.0, 30.0, 14.0, 2);
    assert_eq!(surcharge(heavy.clone(), PackingType::None).breakdown.carrier_surcharge, 0.0);
    let packed = surcharge(heavy, PackingType::Vacuum);
    assert_eq!(packed.breakdown.carrier_surcharge, 45_000.0 * 2.0);
    assert!(packed.warnings.iter().any(|w| w.contains("weight > 25kg")));
}

#[test]
fn auto_upgrade_warns_once_with_region() {
    let mut req = request(vec![CargoItem::new(40.0, 30.0, 30.0, 10.0, 1)]);
    req.pickup_region = "GANGWON".to_string();
    let r = Engine::default().quote(&req);

    assert_eq!(r.truck_tier, "1 Ton Truck (Auto-Upgrade)");
    assert_eq!(r.breakdown.domestic_base, 170_000.0);
    let notes: Vec<&String> = r
        .warnings
        .iter()
        .filter(|w| w.contains("Standard rate unavailable"))
        .collect();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("GANGWON"));
}

#[test]
fn manual_domestic_rate_is_labelled() {
    let mut req = request(vec![CargoItem::new(40.0, 30.0, 30.0, 10.0, 1)]);
    req.pickup_region = "GANGWON".to_string();
    req.manual_domestic_cost = Some(60_000.0);
    let r = Engine::default().quote(&req);

    assert_eq!(r.truck_tier, "Damas (Manual Rate)");
    assert_eq!(r.breakdown.domestic_base, 60_000.0);
    assert!(!r.warnings.iter().any(|w| w.contains("Standard rate unavailable")));
}

#[test]
fn fob_excludes_international_from_margin_base() {
    let mut req = request(vec![CargoItem::new(40.0, 30.0, 30.0, 10.0, 1)]);
    req.trade_term = TradeTerm::Fob;
    req.margin_pct = 25.0;
    let r = Engine::default().quote(&req);

    assert_eq!(r.total_cost, r.breakdown.origin_subtotal());
    assert_eq!(r.total_quote.units(), 106_700);
    assert!(r.warnings.iter().any(|w| w.starts_with("FOB:")));
}

#[test]
fn custom_tables_flow_through() {
    let mut tables = RateTables::default();
    tables.margin.rounding_increment = 1_000;
    tables.packing.handling_fee = 0.0;
    let engine = Engine::new(tables).unwrap();

    let mut req = request(vec![CargoItem::new(40.0, 30.0, 30.0, 10.0, 1)]);
    req.trade_term = TradeTerm::Exw;
    req.margin_pct = 0.0;
    let r = engine.quote(&req);
    // 45,000 domestic, nothing else billed
    assert_eq!(r.total_quote.units(), 45_000);
    assert_eq!(r.total_quote_usd, 45.0);
}
