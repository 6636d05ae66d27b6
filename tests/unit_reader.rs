// tests/unit_reader.rs
mod common;

use common::{ingest_str, FIXTURE};
use drivedata_core::error::DriveDataError;
use drivedata_core::reader::ModelOrder;

#[test]
fn regions_list_global_first_then_first_seen() {
    let store = ingest_str(FIXTURE);
    assert_eq!(store.reader().regions(), vec!["global", "us-east", "eu-west"]);
}

#[test]
fn unknown_region_lists_known_regions() {
    let store = ingest_str(FIXTURE);
    let err = store.reader().drive_stats("ap-south").unwrap_err();
    match &err {
        DriveDataError::RegionNotFound { region, known } => {
            assert_eq!(region, "ap-south");
            assert_eq!(known, &vec!["global", "us-east", "eu-west"]);
        }
        other => panic!("expected RegionNotFound, got {other:?}"),
    }
    let text = err.to_string();
    assert!(text.contains("'ap-south' not found"));
    assert!(text.contains("global us-east eu-west"));
}

#[test]
fn models_by_count_and_by_name() {
    let store = ingest_str(FIXTURE);
    let reader = store.reader();
    assert_eq!(
        reader.model_frequency("us-east", ModelOrder::ByCount).unwrap(),
        vec![("ST4000NM0033", 2), ("HUS726060ALE610", 1)]
    );
    assert_eq!(
        reader.model_frequency("eu-west", ModelOrder::ByName).unwrap(),
        vec![("(NULL)", 1), ("WDC WD40EFRX", 1)]
    );
}

#[test]
fn sizes_ascend_numerically() {
    let store = ingest_str(
        "Hostname,Model,Serial,Size,Power_Cycle_Count,Power_On_Hours\n\
         a.r.x,M,S,10000,1,1\n\
         b.r.x,M,S,960.2,1,1\n\
         c.r.x,M,S,2000,1,1\n",
    );
    let sizes: Vec<u64> = store
        .reader()
        .size_frequency("r")
        .unwrap()
        .into_iter()
        .map(|(gb, _)| gb)
        .collect();
    assert_eq!(sizes, vec![960, 2000, 10000]);
}

#[test]
fn global_is_always_queryable() {
    let store = ingest_str("Hostname,Model,Serial,Size,Power_Cycle_Count,Power_On_Hours\n");
    let reader = store.reader();
    assert!(reader.contains("global"));
    assert_eq!(reader.drive_stats("global").unwrap().count(), 0);
    assert!(reader.size_frequency("global").unwrap().is_empty());
}
