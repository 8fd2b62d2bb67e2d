use chrono::{Duration, NaiveDate, NaiveDateTime};
use quakerisk::{
    get_zone_statistics_at, predict_possible_earthquakes_at, quakes_near, save_kml, Coord,
    EventType, Provenance, QuakeDatabase, QuakeSource, RegionStatistics, RiskLevel,
    SeismicEvent, CARAGA_BOUNDS,
};
use std::io::Read;

/*-------------------------------------------------------------------------------------------------
 *                                         Helpers
 *-----------------------------------------------------------------------------------------------*/

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 20)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

fn event(
    event_id: &str,
    magnitude: f64,
    lat: f64,
    lon: f64,
    depth: f64,
    days_ago: i64,
    region_id: i64,
) -> SeismicEvent {
    SeismicEvent {
        id: 0,
        event_id: event_id.to_owned(),
        magnitude,
        lat,
        lon,
        depth,
        event_type: EventType::MainShock,
        description: Some(format!("Sample event {}", event_id)),
        triggered_at: now() - Duration::days(days_ago),
        recorded_at: now(),
        region_id,
    }
}

/// An in memory database with the Caraga region and the first two sample events.
fn sample_database() -> QuakeDatabase {
    let db = QuakeDatabase::connect(":memory:").unwrap();

    {
        let mut add = db.prepare_to_add_quakes().unwrap();
        let caraga = add
            .add_region("Caraga", Some("CAR"), Some("Caraga Administrative Region"))
            .unwrap();

        let mut aftershock = event("EQ002-2025-11", 5.2, 8.2422, 125.2449, 22.3, 2, caraga);
        aftershock.event_type = EventType::Aftershock;

        let num_added = add
            .add_quakes(&[
                event("EQ001-2025-11", 6.8, 8.9750, 125.5350, 15.5, 2, caraga),
                aftershock,
            ])
            .unwrap();
        assert_eq!(num_added, 2);
    }

    db
}

/*-------------------------------------------------------------------------------------------------
 *                                     Database Storage
 *-----------------------------------------------------------------------------------------------*/

#[test]
fn test_duplicate_records_are_ignored() {
    let db = sample_database();
    let mut add = db.prepare_to_add_quakes().unwrap();

    let first = add.add_region("Caraga", None, None).unwrap();
    let second = add.add_region("Caraga", Some("CAR"), None).unwrap();
    let other = add.add_region("Davao", None, None).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, other);

    let again = event("EQ001-2025-11", 6.8, 8.9750, 125.5350, 15.5, 2, first);
    assert!(!add.add_quake(&again).unwrap());

    let new = event("EQ009-2025-11", 4.1, 9.0, 125.6, 10.0, 1, first);
    assert_eq!(add.add_quakes(&[again, new]).unwrap(), 1);
    drop(add);

    assert_eq!(db.all_quakes().unwrap().len(), 3);
    assert_eq!(db.regions().unwrap().len(), 2);
}

#[test]
fn test_failed_batch_is_rolled_back() {
    let db = sample_database();
    let mut add = db.prepare_to_add_quakes().unwrap();
    let region = add.add_region("Caraga", None, None).unwrap();

    // No such region.
    let bad = event("EQ011-2025-11", 4.2, 9.0, 125.6, 10.0, 1, region + 100);
    let result = add.add_quakes(&[
        event("EQ010-2025-11", 4.1, 9.0, 125.6, 10.0, 1, region),
        bad,
    ]);
    assert!(result.is_err());

    // The connection is usable for the next batch.
    let num_added = add
        .add_quakes(&[event("EQ012-2025-11", 4.4, 9.1, 125.6, 10.0, 1, region)])
        .unwrap();
    assert_eq!(num_added, 1);
    drop(add);

    let ids: Vec<String> = db
        .all_quakes()
        .unwrap()
        .into_iter()
        .map(|eq| eq.event_id)
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&"EQ012-2025-11".to_owned()));
    assert!(!ids.contains(&"EQ010-2025-11".to_owned()));
}

#[test]
fn test_stored_fields_survive() {
    let db = sample_database();

    let quakes = db.all_quakes().unwrap();
    let eq = quakes
        .iter()
        .find(|eq| eq.event_id == "EQ002-2025-11")
        .unwrap();

    assert_eq!(eq.magnitude, 5.2);
    assert_eq!(eq.lat, 8.2422);
    assert_eq!(eq.lon, 125.2449);
    assert_eq!(eq.depth, 22.3);
    assert_eq!(eq.event_type, EventType::Aftershock);
    assert_eq!(eq.description.as_deref(), Some("Sample event EQ002-2025-11"));
    assert_eq!(eq.triggered_at, now() - Duration::days(2));
    assert_eq!(eq.recorded_at, now());

    let regions = db.regions().unwrap();
    assert_eq!(regions[0].id, eq.region_id);
    assert_eq!(regions[0].name, "Caraga");
    assert_eq!(regions[0].code.as_deref(), Some("CAR"));
    assert_eq!(
        regions[0].description.as_deref(),
        Some("Caraga Administrative Region")
    );
}

#[test]
fn test_quakes_since_filters_and_orders() {
    let db = QuakeDatabase::connect(":memory:").unwrap();

    {
        let mut add = db.prepare_to_add_quakes().unwrap();
        let region = add.add_region("Caraga", None, None).unwrap();

        add.add_quakes(&[
            event("OLD", 5.0, 9.0, 125.5, 10.0, 400, region),
            event("MID", 5.0, 9.0, 125.5, 10.0, 30, region),
            event("NEW", 5.0, 9.0, 125.5, 10.0, 1, region),
            event("EDGE", 5.0, 10.0, 126.5, 10.0, 5, region),
            event("AWAY", 5.0, 7.9, 125.5, 10.0, 1, region),
        ])
        .unwrap();
    }

    let cutoff = now() - Duration::days(365);
    let ids: Vec<String> = db
        .quakes_since(cutoff, CARAGA_BOUNDS)
        .unwrap()
        .into_iter()
        .map(|eq| eq.event_id)
        .collect();

    assert_eq!(ids, vec!["NEW", "EDGE", "MID"]);
}

/*-------------------------------------------------------------------------------------------------
 *                                     Risk Analysis
 *-----------------------------------------------------------------------------------------------*/

#[test]
fn test_predictions_from_database() {
    let db = sample_database();

    let predictions = predict_possible_earthquakes_at(&db, now()).unwrap();
    let ids: Vec<&str> = predictions.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(ids.len(), 4);
    assert_eq!(ids[0], "pred_8.97_125.53");
    assert_eq!(ids[1], "zone_Surigao_Fault_Zone");
    // These two tie on score.
    assert!(ids[2..].contains(&"pred_8.24_125.24"));
    assert!(ids[2..].contains(&"zone_Agusan_Marsh_Zone"));

    let top = &predictions[0];
    assert_eq!(top.provenance, Provenance::Prediction);
    assert_eq!(top.risk_score, 59.0);
    assert_eq!(top.risk_level, RiskLevel::High);

    for pair in predictions.windows(2) {
        assert!(pair[0].risk_score >= pair[1].risk_score);
    }
}

#[test]
fn test_statistics_from_database() {
    let db = sample_database();

    let stats = get_zone_statistics_at(&db, now()).unwrap();

    assert_eq!(stats.total_earthquakes_1year, 2);
    assert_eq!(stats.average_magnitude, 6.0);
    assert_eq!(stats.highest_magnitude, 6.8);
    assert_eq!(
        stats.regions,
        vec![RegionStatistics {
            name: "Caraga".to_owned(),
            count: 2,
            avg_magnitude: 6.0,
        }]
    );

    // A year later nothing is recent enough to count.
    let stats = get_zone_statistics_at(&db, now() + Duration::days(400)).unwrap();
    assert_eq!(stats.total_earthquakes_1year, 0);
    assert!(stats.regions.is_empty());
}

#[test]
fn test_quakes_near_location() {
    let db = sample_database();
    let all = db.all_quakes().unwrap();

    let butuan = Coord {
        lat: 8.95,
        lon: 125.54,
    };

    let nearby = quakes_near(&all, butuan, 50.0);
    assert_eq!(nearby.len(), 1);
    assert_eq!(nearby[0].event_id, "EQ001-2025-11");

    assert_eq!(quakes_near(&all, butuan, 150.0).len(), 2);
}

/*-------------------------------------------------------------------------------------------------
 *                                        KML Output
 *-----------------------------------------------------------------------------------------------*/

#[test]
fn test_save_kml_and_kmz() {
    let db = sample_database();
    let predictions = predict_possible_earthquakes_at(&db, now()).unwrap();

    let dir = std::env::temp_dir();
    let kml_path = dir.join(format!("quakerisk_test_{}.kml", std::process::id()));
    let kmz_path = dir.join(format!("quakerisk_test_{}.kmz", std::process::id()));

    save_kml(&predictions, &kml_path).unwrap();
    save_kml(&predictions, &kmz_path).unwrap();

    let text = std::fs::read_to_string(&kml_path).unwrap();
    assert!(text.contains("<name>Predicted Zones</name>"));
    assert!(text.contains("<name>Known Fault Zones</name>"));
    assert!(text.contains("<name>Surigao Fault Zone</name>"));
    assert!(text.contains("<styleUrl>#high</styleUrl>"));
    assert!(text.trim_end().ends_with("</kml>"));

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&kmz_path).unwrap()).unwrap();
    let mut kmz_text = String::new();
    archive
        .by_name("doc.kml")
        .unwrap()
        .read_to_string(&mut kmz_text)
        .unwrap();
    assert_eq!(kmz_text, text);

    let _ = std::fs::remove_file(&kml_path);
    let _ = std::fs::remove_file(&kmz_path);
}
