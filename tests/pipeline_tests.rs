use titanic_analysis::charts::ChartBuilder;
use titanic_analysis::data::{AgeBand, DataLoader, PassengerRecord, Sex};
use titanic_analysis::stats::{DemographicsAggregator, FamilyAggregator, NameCounter};

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/titanic_sample.csv"
);

fn load_fixture() -> Vec<PassengerRecord> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(FIXTURE)
        .expect("Failed to load fixture manifest")
        .to_vec()
}

#[test]
fn test_loader_reads_fixture_manifest() {
    let records = load_fixture();
    assert_eq!(records.len(), 12);

    let braund = &records[0];
    assert_eq!(braund.id, 1);
    assert!(!braund.survived);
    assert_eq!(braund.class, 3);
    assert_eq!(braund.surname(), "Braund");
    assert_eq!(braund.family_size(), 2);
    assert_eq!(braund.fare, 7.25);

    // Row 6 carries no age; everything else about it is usable
    let moran = &records[5];
    assert_eq!(moran.surname(), "Moran");
    assert_eq!(moran.age, None);
    assert_eq!(moran.age_band(), None);
}

#[test]
fn test_demographics_over_fixture() {
    let records = load_fixture();
    let buckets = DemographicsAggregator::aggregate(&records);
    assert_eq!(buckets.len(), 24);

    // One passenger has no age, so 11 of 12 land in a bucket
    let total: u32 = buckets.iter().map(|b| b.passenger_count).sum();
    assert_eq!(total, 11);

    let find = |class: i32, sex: Sex, band: AgeBand| {
        buckets
            .iter()
            .find(|b| b.class == class && b.sex == sex && b.age_band == band)
            .expect("cross-product bucket missing")
    };

    let first_class_women = find(1, Sex::Female, AgeBand::Adult);
    assert_eq!(first_class_women.passenger_count, 3);
    assert_eq!(first_class_women.survivor_count, 3);
    assert_eq!(first_class_women.survival_rate, 1.0);

    let third_class_men = find(3, Sex::Male, AgeBand::Adult);
    assert_eq!(third_class_men.passenger_count, 2);
    assert_eq!(third_class_men.survivor_count, 0);
    assert_eq!(third_class_men.survival_rate, 0.0);

    let second_class_teens = find(2, Sex::Female, AgeBand::Teen);
    assert_eq!(second_class_teens.passenger_count, 1);
    assert_eq!(second_class_teens.survival_rate, 1.0);

    for bucket in &buckets {
        assert!(bucket.survival_rate >= 0.0 && bucket.survival_rate <= 1.0);
        if bucket.passenger_count == 0 {
            assert_eq!(bucket.survival_rate, 0.0);
        }
    }
}

#[test]
fn test_demographics_table_renders_every_bucket() {
    // Lifted row limit, as the binary configures it before printing
    std::env::set_var("POLARS_FMT_MAX_ROWS", "-1");

    let records = load_fixture();
    let buckets = DemographicsAggregator::aggregate(&records);
    let df = DemographicsAggregator::to_dataframe(&buckets)
        .expect("Failed to project demographics");
    let rendered = format!("{df}");

    // All 24 rows visible: one Senior band row per class/sex pair, no elision
    assert_eq!(rendered.matches("Senior").count(), 6);
    assert!(!rendered.contains('…'));
}

#[test]
fn test_family_fares_over_fixture() {
    let records = load_fixture();
    let buckets = FamilyAggregator::aggregate(&records);

    let keys: Vec<(i32, u32)> = buckets.iter().map(|b| (b.class, b.family_size)).collect();
    assert_eq!(
        keys,
        vec![(1, 1), (1, 2), (2, 2), (3, 1), (3, 2), (3, 3), (3, 5)]
    );

    // Solo first-class travelers: McCarthy and Bonnell
    let solo_first = &buckets[0];
    assert_eq!(solo_first.passenger_count, 2);
    assert!((solo_first.avg_fare - 39.20625).abs() < 1e-9);
    assert_eq!(solo_first.min_fare, 26.55);
    assert_eq!(solo_first.max_fare, 51.8625);

    for bucket in &buckets {
        assert!(bucket.family_size >= 1);
        assert!(bucket.min_fare <= bucket.avg_fare && bucket.avg_fare <= bucket.max_fare);
    }
}

#[test]
fn test_surname_counts_over_fixture() {
    let records = load_fixture();
    let counts = NameCounter::count(&records);

    // All twelve surnames are distinct in this slice of the manifest
    assert_eq!(counts.len(), 12);
    let total: u32 = counts.iter().map(|c| c.count).sum();
    assert_eq!(total as usize, records.len());

    for pair in counts.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    assert_eq!(counts[0].surname, "Braund");
    assert_eq!(counts[11].surname, "Bonnell");
}

#[test]
fn test_chart_specs_over_fixture() {
    let records = load_fixture();
    let demographics = DemographicsAggregator::aggregate(&records);
    let families = FamilyAggregator::aggregate(&records);

    let survival = ChartBuilder::survival_chart(&demographics);
    assert_eq!(survival.panels.len(), 3);
    assert!(survival.panels.iter().all(|p| p.bars.len() == 8));
    assert_eq!(survival.y_range, (0.0, 1.0));

    let bar = survival.panels[0]
        .bars
        .iter()
        .find(|b| b.age_band == AgeBand::Adult && b.sex == Sex::Female)
        .expect("adult women bar missing from class 1 panel");
    assert_eq!(bar.survival_rate, 1.0);
    assert_eq!(bar.label, "1.00");

    let family = ChartBuilder::family_chart(&families);
    assert_eq!(family.points.len(), 7);
    let palsson_family = family
        .points
        .iter()
        .find(|p| p.family_size == 5 && p.class == 3)
        .expect("five-person third-class family missing");
    assert_eq!(palsson_family.passenger_count, 1);
    assert_eq!(palsson_family.min_fare, 21.075);
    assert_eq!(palsson_family.max_fare, 21.075);

    let json = serde_json::to_string_pretty(&family).expect("Failed to serialize chart spec");
    assert!(json.contains("\"min_fare\""));
    assert!(json.contains("Average Ticket Fare by Family Size and Passenger Class"));
}
