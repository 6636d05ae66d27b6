// tests/common/mod.rs
#![allow(dead_code)]

use drivedata_core::aggregator::{Aggregator, DriveRecord};
use drivedata_core::config::IngestConfig;
use drivedata_core::store::AggregateStore;

pub const HEADER: &str =
    "Hostname,Model,Serial,Size,UDMA_CRC_Error_Count,Raw_Read_Error_Rate,Power_Cycle_Count,Power_On_Hours";

/// Two regions, one comment, and every repair path except malformed hostnames.
pub const FIXTURE: &str = "\
Hostname,Model,Serial,Size,UDMA_CRC_Error_Count,Raw_Read_Error_Rate,Power_Cycle_Count,Power_On_Hours
host1.us-east.example.com,ST4000NM0033-9ZM170,S1,4000.78,0,0,10,100
host2.us-east.example.com,ST4000NM0033-9ZM170,S2,4000.78,0,0,,
host3.us-east.example.com,HUS726060ALE610,S3,6001.18,0,0,20,300
#host4.us-east.example.com,X,S4,1,0,0,1,1
host5.eu-west.example.com,,S5,0,0,0,abc,17520.9
host6.eu-west.example.com,WDC WD40EFRX-68N32N0,S6,,0,0,5,140000
";

pub fn record(hostname: &str, poh: &str, pcc: &str, model: &str, size: &str) -> DriveRecord {
    DriveRecord {
        hostname: hostname.to_string(),
        model: model.to_string(),
        serial: "SN".to_string(),
        size: size.to_string(),
        power_cycle_count: pcc.to_string(),
        power_on_hours: poh.to_string(),
        ..DriveRecord::default()
    }
}

pub fn ingest_str(text: &str) -> AggregateStore {
    let mut aggregator = Aggregator::new(IngestConfig::default());
    aggregator
        .ingest_reader(text.as_bytes())
        .expect("fixture should ingest");
    aggregator.finish()
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
