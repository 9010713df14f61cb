use crate::shared::*;

/// Built-in crop table.
///
/// The first eight crops are common and sold in every region. The rest are
/// tagged with the region(s) whose shop carries them.
///
///   Vegetable: tomato (3d), carrot (3d), corn (5d)
///   Fruit:     strawberry (4d), watermelon (10d)
///   Herb:      basil (2d)
///   Flower:    sunflower (7d), rose (8d)
pub fn builtin_crops() -> Vec<CropDef> {
    vec![
        // ── Common ──────────────────────────────────────────────────────────

        CropDef {
            id: "tomato".into(),
            name: "Tomato".into(),
            description: "Red, juicy fruit that's technically a berry. Great for salads and sauces.".into(),
            care_instructions: "Water regularly, provide support for vines, and harvest when fully red.".into(),
            price: 20,
            growth_days: 3,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 40,
            regions: vec![],
        },

        CropDef {
            id: "carrot".into(),
            name: "Carrot".into(),
            description: "Orange root vegetable, sweet and crunchy.".into(),
            care_instructions: "Grow in loose soil, thin seedlings, keep soil consistently moist.".into(),
            price: 15,
            growth_days: 3,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 30,
            regions: vec![],
        },

        CropDef {
            id: "corn".into(),
            name: "Corn".into(),
            description: "Sweet golden kernels on a cob.".into(),
            care_instructions: "Plant in blocks for pollination and water deeply.".into(),
            price: 25,
            growth_days: 5,
            water_needs: WaterNeeds::High,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 45,
            regions: vec![],
        },

        CropDef {
            id: "strawberry".into(),
            name: "Strawberry".into(),
            description: "Sweet red berries with tiny seeds. Perfect for desserts.".into(),
            care_instructions: "Keep soil moist but not wet, remove runners.".into(),
            price: 30,
            growth_days: 4,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Fruit,
            harvest_value: 50,
            regions: vec![],
        },

        CropDef {
            id: "sunflower".into(),
            name: "Sunflower".into(),
            description: "Tall flower with large yellow petals and edible seeds.".into(),
            care_instructions: "Plant in well-drained soil, water until established.".into(),
            price: 15,
            growth_days: 7,
            water_needs: WaterNeeds::Low,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Flower,
            harvest_value: 35,
            regions: vec![],
        },

        CropDef {
            id: "basil".into(),
            name: "Basil".into(),
            description: "Aromatic herb for Italian and Asian cooking.".into(),
            care_instructions: "Pinch flowers to encourage leaf growth.".into(),
            price: 10,
            growth_days: 2,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::PartialShade,
            category: CropCategory::Herb,
            harvest_value: 20,
            regions: vec![],
        },

        CropDef {
            id: "watermelon".into(),
            name: "Watermelon".into(),
            description: "Large refreshing fruit with sweet red flesh.".into(),
            care_instructions: "Needs lots of space. Water deeply but infrequently.".into(),
            price: 40,
            growth_days: 10,
            water_needs: WaterNeeds::High,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Fruit,
            harvest_value: 80,
            regions: vec![],
        },

        CropDef {
            id: "rose".into(),
            name: "Rose".into(),
            description: "Classic flower known for its beauty and fragrance.".into(),
            care_instructions: "Prune regularly, water at the base, watch for pests.".into(),
            price: 35,
            growth_days: 8,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Flower,
            harvest_value: 60,
            regions: vec![],
        },

        // ── Regional ────────────────────────────────────────────────────────

        CropDef {
            id: "pumpkin".into(),
            name: "Pumpkin".into(),
            description: "Heavy orange squash, the centre of every autumn fair.".into(),
            care_instructions: "Give vines room to sprawl and water at the roots.".into(),
            price: 30,
            growth_days: 9,
            water_needs: WaterNeeds::High,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 70,
            regions: vec![Region::Usa, Region::Canada],
        },

        CropDef {
            id: "blueberry".into(),
            name: "Blueberry".into(),
            description: "Small dusky berries that thrive in cool climates.".into(),
            care_instructions: "Prefers acidic soil. Mulch to hold moisture.".into(),
            price: 25,
            growth_days: 6,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::PartialShade,
            category: CropCategory::Fruit,
            harvest_value: 50,
            regions: vec![Region::Canada],
        },

        CropDef {
            id: "chili_pepper".into(),
            name: "Chili Pepper".into(),
            description: "Fiery pods that love the heat.".into(),
            care_instructions: "Let soil dry slightly between waterings.".into(),
            price: 15,
            growth_days: 4,
            water_needs: WaterNeeds::Low,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 35,
            regions: vec![Region::Mexico, Region::Usa],
        },

        CropDef {
            id: "avocado".into(),
            name: "Avocado".into(),
            description: "Creamy green fruit from a slow-growing tree.".into(),
            care_instructions: "Water deeply and protect young trees from frost.".into(),
            price: 45,
            growth_days: 12,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Fruit,
            harvest_value: 95,
            regions: vec![Region::Mexico],
        },

        CropDef {
            id: "cassava".into(),
            name: "Cassava".into(),
            description: "Starchy root that shrugs off drought.".into(),
            care_instructions: "Plant stem cuttings in loose soil. Water sparingly.".into(),
            price: 15,
            growth_days: 6,
            water_needs: WaterNeeds::Low,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 40,
            regions: vec![Region::Brazil],
        },

        CropDef {
            id: "pineapple".into(),
            name: "Pineapple".into(),
            description: "Spiky tropical fruit with a sweet, tangy core.".into(),
            care_instructions: "Keep warm and let the soil drain well.".into(),
            price: 40,
            growth_days: 11,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Fruit,
            harvest_value: 85,
            regions: vec![Region::Brazil],
        },

        CropDef {
            id: "potato".into(),
            name: "Potato".into(),
            description: "Dependable tuber for cool, damp summers.".into(),
            care_instructions: "Hill soil around stems as they grow.".into(),
            price: 10,
            growth_days: 4,
            water_needs: WaterNeeds::Medium,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Vegetable,
            harvest_value: 25,
            regions: vec![Region::Uk, Region::Canada],
        },

        CropDef {
            id: "lavender".into(),
            name: "Lavender".into(),
            description: "Fragrant purple spikes loved by bees.".into(),
            care_instructions: "Full sun, poor soil, very little water.".into(),
            price: 20,
            growth_days: 6,
            water_needs: WaterNeeds::Low,
            sun_needs: SunNeeds::FullSun,
            category: CropCategory::Flower,
            harvest_value: 45,
            regions: vec![Region::Uk],
        },

        CropDef {
            id: "mint".into(),
            name: "Mint".into(),
            description: "Vigorous herb for teas and sauces.".into(),
            care_instructions: "Grow in a container to stop it spreading.".into(),
            price: 10,
            growth_days: 2,
            water_needs: WaterNeeds::High,
            sun_needs: SunNeeds::PartialShade,
            category: CropCategory::Herb,
            harvest_value: 20,
            regions: vec![Region::Uk],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_set_is_the_eight_starter_crops() {
        let common: Vec<String> = builtin_crops()
            .into_iter()
            .filter(|c| c.is_common())
            .map(|c| c.id)
            .collect();
        assert_eq!(
            common,
            vec!["tomato", "carrot", "corn", "strawberry", "sunflower", "basil", "watermelon", "rose"]
        );
    }

    #[test]
    fn test_every_region_has_its_own_crops() {
        let crops = builtin_crops();
        for region in Region::ALL {
            assert!(
                crops.iter().any(|c| c.regions.contains(&region)),
                "{region:?} has no regional crops"
            );
        }
    }
}
