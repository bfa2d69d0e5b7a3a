use super::common::*;
use crate::scoring::{
    FleetType, ENERGY_RECOMMENDATION, FLEET_RECOMMENDATION, LEADER_RECOMMENDATION,
    MATERIALS_RECOMMENDATION, WASTE_RECOMMENDATION,
};

#[test]
fn all_rules_fire_in_fixed_order() {
    let data = technology(2_000.0, 100.0, 0.0, FleetType::Hybrid);

    let result = engine().calculate(&data);

    assert_eq!(
        result.recommendations,
        vec![
            ENERGY_RECOMMENDATION.to_string(),
            WASTE_RECOMMENDATION.to_string(),
            MATERIALS_RECOMMENDATION.to_string(),
            FLEET_RECOMMENDATION.to_string(),
        ]
    );
}

#[test]
fn low_energy_and_waste_list_energy_first() {
    let data = technology(2_000.0, 100.0, 80.0, FleetType::Electric);

    let result = engine().calculate(&data);

    assert_eq!(
        result.recommendations,
        vec![
            ENERGY_RECOMMENDATION.to_string(),
            WASTE_RECOMMENDATION.to_string(),
        ]
    );
}

#[test]
fn threshold_is_strictly_below_sixty() {
    // 1600 kWh of a 2000 baseline: 1 - 0.4 = 60 exactly.
    let data = technology(1_600.0, 0.0, 60.0, FleetType::Electric);

    let result = engine().calculate(&data);

    assert_eq!(result.energy_score, 60);
    assert_eq!(result.recommendations, vec![LEADER_RECOMMENDATION.to_string()]);
}

#[test]
fn unrounded_sub_score_drives_the_rule() {
    // 59.6 rounds to 60 for display but still triggers.
    let data = technology(0.0, 0.0, 59.6, FleetType::Electric);

    let result = engine().calculate(&data);

    assert_eq!(result.material_score, 60);
    assert_eq!(
        result.recommendations,
        vec![MATERIALS_RECOMMENDATION.to_string()]
    );
}

#[test]
fn combustion_fleet_alone_triggers_transition_advice() {
    let data = technology(0.0, 0.0, 100.0, FleetType::Ice);

    let result = engine().calculate(&data);

    assert_eq!(result.recommendations, vec![FLEET_RECOMMENDATION.to_string()]);
}
