//! Chart pipeline against in-memory ephemeris providers.
//!
//! The fake provider answers fixed sidereal longitudes, so every derived
//! quantity below can be checked by hand.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use kundali_chart::{ChartError, ChartRequest, compute_chart};
use kundali_ephem::{
    CalcFlags, CallbackEphemeris, Completion, DirectEphemeris, EngineKind, EphemError,
    EphemerisAdapter, EphemerisConfig, Provider,
};
use kundali_geo::{NoaaSolarTimes, SolarError, SolarTimes, SunTimes};
use kundali_vedic_base::{AspectKind, Body, ChartPoint, Paksha};
use serde_json::{Value, json};

const JD_1990_01_15_NOON: f64 = 2_447_907.0;

/// Sidereal longitude per Swiss ephemeris body code.
fn longitude_for(ipl: i32) -> f64 {
    match ipl {
        0 => 348.0,  // Sun
        1 => 0.0,    // Moon
        2 => 330.0,  // Mercury
        3 => 310.5,  // Venus
        4 => 200.0,  // Mars
        5 => 95.0,   // Jupiter
        6 => 290.0,  // Saturn
        7 => 275.0,  // Uranus
        8 => 282.0,  // Neptune
        9 => 227.0,  // Pluto
        11 => 310.0, // true node
        _ => f64::NAN,
    }
}

#[derive(Clone)]
struct FakeEphemeris {
    /// Engines that fail from the Moon onwards.
    broken: Vec<EngineKind>,
    houses: Value,
    calls: Arc<Mutex<Vec<(EngineKind, i32)>>>,
}

impl FakeEphemeris {
    fn new() -> Self {
        let cusps: Vec<f64> = (0..12).map(|i| 100.0 + 30.0 * i as f64).collect();
        Self {
            broken: Vec::new(),
            houses: json!({"cusps": cusps, "ascmc": [100.0, 10.0]}),
            calls: Arc::default(),
        }
    }

    fn broken(mut self, engines: &[EngineKind]) -> Self {
        self.broken = engines.to_vec();
        self
    }

    fn calc(&self, ipl: i32, flags: CalcFlags) -> Value {
        let engine = EngineKind::from_flags(flags).expect("engine flag set");
        assert!(flags.contains(CalcFlags::SIDEREAL) && flags.contains(CalcFlags::SPEED));
        self.calls.lock().unwrap().push((engine, ipl));
        if self.broken.contains(&engine) && ipl == 1 {
            return json!({"serr": format!("{engine}: sepl_18.se1 unreadable")});
        }
        json!({"xx": [longitude_for(ipl), 0.0, 1.0, 0.9]})
    }

    fn call_log(&self) -> Vec<(EngineKind, i32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectEphemeris for FakeEphemeris {
    async fn calc_ut(&self, _jd: f64, ipl: i32, flags: CalcFlags) -> Result<Value, EphemError> {
        Ok(self.calc(ipl, flags))
    }

    async fn houses(&self, _jd: f64, _la: f64, _lo: f64, _h: char) -> Result<Value, EphemError> {
        Ok(self.houses.clone())
    }

    async fn ayanamsa_ut(&self, _jd: f64, _f: CalcFlags) -> Result<Value, EphemError> {
        Ok(json!(23.5))
    }

    fn version(&self) -> String {
        "fake 1.0".into()
    }
}

impl CallbackEphemeris for FakeEphemeris {
    fn calc_ut(&self, _jd: f64, ipl: i32, flags: CalcFlags, done: Completion) {
        done(self.calc(ipl, flags));
    }

    fn houses(&self, _jd: f64, _la: f64, _lo: f64, _h: char, done: Completion) {
        done(self.houses.clone());
    }

    fn ayanamsa_ut(&self, _jd: f64, _f: CalcFlags, done: Completion) {
        done(json!({"ayanamsa": 23.5}));
    }
}

struct PolarSolar;

#[async_trait]
impl SolarTimes for PolarSolar {
    async fn sun_times(&self, _d: NaiveDate, _la: f64, _lo: f64) -> Result<SunTimes, SolarError> {
        Err(SolarError::NeverRises)
    }
}

fn adapter(provider: Provider, dir: &Path) -> EphemerisAdapter {
    let config = EphemerisConfig {
        ephe_path: dir.to_path_buf(),
        timeout: Duration::from_secs(2),
        ..EphemerisConfig::default()
    };
    EphemerisAdapter::new(provider, Arc::new(config)).unwrap()
}

fn dir_with_data_file() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sepl_18.se1"), b"").unwrap();
    dir
}

fn request() -> ChartRequest {
    ChartRequest {
        date: Some("1990-01-15".into()),
        time: Some("12:00:00".into()),
        timezone: Some("UTC".into()),
        latitude: Some(0.0),
        longitude: Some(0.0),
        ..ChartRequest::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_chart_from_fixed_longitudes() {
    let dir = tempfile::tempdir().unwrap();
    let a = adapter(Provider::direct(FakeEphemeris::new()), dir.path());
    let report = compute_chart(&a, Some(&NoaaSolarTimes), &request()).await.unwrap();

    assert_eq!(report.engine, EngineKind::Moseph);
    assert!(close(report.jd_ut, JD_1990_01_15_NOON));
    assert!((0.0..24.0).contains(&report.lst_hours));
    assert_eq!(report.lst_hms.len(), 8);
    assert_eq!(report.timezone.resolved, "UTC");
    assert_eq!(report.house_system, "P");

    // D1: houses are tropical minus 23.5.
    assert!(close(report.d1.ascendant, 76.5));
    assert_eq!(report.d1.cusps[0], 0.0);
    assert!(close(report.d1.cusps[1], 76.5));
    assert!(close(report.d1.cusps[12], 406.5 - 360.0));
    assert_eq!(report.d1.positions.len(), 12);
    assert!(close(report.d1.positions[&Body::Ketu], 130.0));

    // D9: Gemini 16.5 -> Aquarius 28.5; Pisces 18 -> Sagittarius 12.
    assert!(close(report.d9.ascendant, 328.5));
    assert!(close(report.d9.cusps[1], 300.0));
    assert!(close(report.d9.cusps[3], 0.0));
    assert!(close(report.d9.positions[&Body::Sun], 252.0));
    assert!(close(report.d9.positions[&Body::Moon], 0.0));

    // Nakshatras: 13 rows, ascendant in Ardra.
    assert_eq!(report.nakshatras.len(), 13);
    assert_eq!(report.nakshatras[0].body, ChartPoint::Ascendant);
    assert_eq!(report.nakshatras[0].sign, "Gemini");
    assert_eq!(report.nakshatras[0].lord, Body::Rahu);

    // Dasha: Moon at 0 starts a full Ketu period.
    assert_eq!(report.dasha.len(), 9);
    assert_eq!(report.dasha[0].lord, Body::Ketu);
    assert!((report.dasha[0].years - 7.0).abs() < 1e-6);
    assert_eq!(report.dasha[0].start, "1990-01-15T12:00:00.000+00:00");
    for w in report.dasha.windows(2) {
        assert_eq!(w[0].end, w[1].start);
    }
    let total: f64 = report.dasha.iter().map(|d| d.years).sum();
    assert!((total - 120.0).abs() < 1e-6);

    // Panchanga: elongation 12 -> tithi 2, karana Balava.
    assert_eq!(report.panchanga.weekday, "Monday");
    assert_eq!(report.panchanga.tithi_number, 2);
    assert_eq!(report.panchanga.paksha, Paksha::Shukla);
    assert_eq!(report.panchanga.karana, "Balava");
    assert_eq!(report.panchanga.nakshatra, "Ashwini");

    // Nodes are always opposed.
    assert!(report.aspects.iter().any(|r| {
        r.kind == AspectKind::Opposition
            && r.a == ChartPoint::Body(Body::Rahu)
            && r.b == ChartPoint::Body(Body::Ketu)
            && r.delta < 1e-9
    }));

    let sunrise = report.sunrise.as_deref().unwrap();
    assert!(sunrise.starts_with("1990-01-15T06:"), "{sunrise}");
    assert!(report.sunset.is_some());
}

#[tokio::test]
async fn callback_provider_gives_same_chart() {
    let dir = tempfile::tempdir().unwrap();
    let direct = adapter(Provider::direct(FakeEphemeris::new()), dir.path());
    let callback = adapter(Provider::callback(FakeEphemeris::new()), dir.path());
    let a = compute_chart(&direct, None, &request()).await.unwrap();
    let b = compute_chart(&callback, None, &request()).await.unwrap();
    assert_eq!(a.d1, b.d1);
    assert_eq!(a.d9, b.d9);
    assert!(b.sunrise.is_none());
}

#[tokio::test]
async fn chart_serializes() {
    let dir = tempfile::tempdir().unwrap();
    let a = adapter(Provider::direct(FakeEphemeris::new()), dir.path());
    let report = compute_chart(&a, None, &request()).await.unwrap();
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["engine"], "MOSEPH");
    assert_eq!(v["d1"]["positions"]["Ketu"], 130.0);
    assert_eq!(v["nakshatras"][0]["body"], "Ascendant");
    assert!(v["sunrise"].is_null());
}

// ---------------------------------------------------------------------------
// Engine fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forced_broken_primary_falls_back() {
    let dir = dir_with_data_file();
    let fake = FakeEphemeris::new().broken(&[EngineKind::Swieph]);
    let a = adapter(Provider::direct(fake.clone()), dir.path());
    let req = ChartRequest {
        force_engine: Some("SWIEPH".into()),
        ..request()
    };
    let report = compute_chart(&a, None, &req).await.unwrap();
    assert_eq!(report.engine, EngineKind::Moseph);

    let log = fake.call_log();
    let swieph: Vec<i32> = log
        .iter()
        .filter(|(e, _)| *e == EngineKind::Swieph)
        .map(|(_, ipl)| *ipl)
        .collect();
    assert_eq!(swieph, vec![0, 1], "primary stops at the first failure");
    let moseph = log.iter().filter(|(e, _)| *e == EngineKind::Moseph).count();
    assert_eq!(moseph, 11, "fallback recomputes the whole set");
}

#[tokio::test]
async fn unforced_uses_primary_when_files_present() {
    let dir = dir_with_data_file();
    let a = adapter(Provider::direct(FakeEphemeris::new()), dir.path());
    let report = compute_chart(&a, None, &request()).await.unwrap();
    assert_eq!(report.engine, EngineKind::Swieph);
}

#[tokio::test]
async fn exhausted_engines_are_attributed() {
    let dir = dir_with_data_file();
    let fake = FakeEphemeris::new().broken(&[EngineKind::Swieph, EngineKind::Moseph]);
    let a = adapter(Provider::direct(fake), dir.path());
    let err = compute_chart(&a, None, &request()).await.unwrap_err();
    assert_eq!(err.kind(), "ephemeris_failure");
    assert_eq!(err.status(), 500);
    match err {
        ChartError::Ephemeris(f) => {
            assert_eq!(f.body, Body::Moon);
            assert_eq!(f.engines, vec![EngineKind::Swieph, EngineKind::Moseph]);
            assert_eq!(f.last_engine(), Some(EngineKind::Moseph));
            assert!(f.detail.contains("MOSEPH: sepl_18.se1 unreadable"), "{}", f.detail);
            assert_eq!(f.ephe_files, vec!["sepl_18.se1".to_string()]);
            assert_eq!(f.version, "fake 1.0");
            assert!(close(f.jd_ut, JD_1990_01_15_NOON));
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_precedes_provider_calls() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeEphemeris::new();
    let a = adapter(Provider::direct(fake.clone()), dir.path());
    let req = ChartRequest {
        latitude: Some(95.0),
        ..request()
    };
    let err = compute_chart(&a, None, &req).await.unwrap_err();
    assert_eq!(err.kind(), "validation_error");
    assert!(fake.call_log().is_empty());

    let req = ChartRequest {
        date: Some("15th of Jan".into()),
        ..request()
    };
    let err = compute_chart(&a, None, &req).await.unwrap_err();
    assert_eq!(err.kind(), "unparseable_datetime");
    assert!(fake.call_log().is_empty());
}

#[tokio::test]
async fn unusable_house_reply_reports_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut fake = FakeEphemeris::new();
    fake.houses = json!({"foo": 1, "bar": [1, 2]});
    let a = adapter(Provider::direct(fake), dir.path());
    let err = compute_chart(&a, None, &request()).await.unwrap_err();
    assert_eq!(err.kind(), "house_computation_failed");
    let body = serde_json::to_value(err.body()).unwrap();
    let keys = body["details"]["hRawKeys"].as_array().unwrap();
    assert!(keys.contains(&json!("foo")) && keys.contains(&json!("bar")));
}

#[tokio::test]
async fn solar_failure_leaves_times_empty() {
    let dir = tempfile::tempdir().unwrap();
    let a = adapter(Provider::direct(FakeEphemeris::new()), dir.path());
    let report = compute_chart(&a, Some(&PolarSolar), &request()).await.unwrap();
    assert!(report.sunrise.is_none());
    assert!(report.sunset.is_none());
}

#[tokio::test]
async fn local_zone_carries_through() {
    let dir = tempfile::tempdir().unwrap();
    let a = adapter(Provider::direct(FakeEphemeris::new()), dir.path());
    let req = ChartRequest {
        time: Some("5:30 PM".into()),
        timezone: Some("Kolkata/Asia".into()),
        latitude: Some(13.08),
        longitude: Some(80.27),
        ..request()
    };
    let report = compute_chart(&a, Some(&NoaaSolarTimes), &req).await.unwrap();
    assert!(close(report.jd_ut, JD_1990_01_15_NOON));
    assert_eq!(report.timezone.corrected.as_deref(), Some("Asia/Kolkata"));
    assert_eq!(report.dasha[0].start, "1990-01-15T17:30:00.000+05:30");
    assert!(report.sunrise.unwrap().ends_with("+05:30"));
}
