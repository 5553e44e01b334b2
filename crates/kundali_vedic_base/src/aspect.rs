//! Major aspects between chart points.
//!
//! Five aspects with fixed orbs are checked in priority order:
//! Conjunction (0 ±6), Opposition (180 ±6), Trine (120 ±5), Square (90 ±5),
//! Sextile (60 ±4). The first aspect whose orb contains the separation
//! wins, so a pair carries at most one aspect.
//!
//! Two sets are built and merged: all pairs among the 12 bodies, and the
//! ascendant against each body. On a key collision the ascendant entry
//! replaces the pairwise one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::body::{ChartPoint, TABLE_BODIES};
use crate::error::VedicError;
use crate::frame::ChartFrame;
use crate::util::angular_separation;

/// Aspect type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

/// `(kind, exact angle, orb)` in priority order.
pub const ASPECT_TABLE: [(AspectKind, f64, f64); 5] = [
    (AspectKind::Conjunction, 0.0, 6.0),
    (AspectKind::Opposition, 180.0, 6.0),
    (AspectKind::Trine, 120.0, 5.0),
    (AspectKind::Square, 90.0, 5.0),
    (AspectKind::Sextile, 60.0, 4.0),
];

impl AspectKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Opposition => "Opposition",
            Self::Trine => "Trine",
            Self::Square => "Square",
            Self::Sextile => "Sextile",
        }
    }
}

/// An aspect between two chart points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRecord {
    pub a: ChartPoint,
    pub b: ChartPoint,
    pub kind: AspectKind,
    /// |separation − exact angle|, always within the orb.
    pub delta: f64,
}

impl AspectRecord {
    /// Unordered identity of the record: (lower point, higher point, kind).
    fn key(&self) -> (ChartPoint, ChartPoint, AspectKind) {
        if self.a <= self.b {
            (self.a, self.b, self.kind)
        } else {
            (self.b, self.a, self.kind)
        }
    }
}

/// Classify the separation between two longitudes.
///
/// Returns the first matching aspect and its deviation from exact.
pub fn classify_aspect(lon_a: f64, lon_b: f64) -> Option<(AspectKind, f64)> {
    let sep = angular_separation(lon_a, lon_b);
    ASPECT_TABLE.iter().find_map(|&(kind, angle, orb)| {
        let delta = (sep - angle).abs();
        (delta <= orb).then_some((kind, delta))
    })
}

/// All aspected pairs among the 12 bodies, in table order.
pub fn pairwise_aspects(frame: &ChartFrame) -> Result<Vec<AspectRecord>, VedicError> {
    let mut out = Vec::new();
    for (i, &a) in TABLE_BODIES.iter().enumerate() {
        let lon_a = frame.position(a)?;
        for &b in &TABLE_BODIES[i + 1..] {
            let lon_b = frame.position(b)?;
            if let Some((kind, delta)) = classify_aspect(lon_a, lon_b) {
                out.push(AspectRecord {
                    a: a.into(),
                    b: b.into(),
                    kind,
                    delta,
                });
            }
        }
    }
    Ok(out)
}

/// Aspects from the ascendant to each body.
pub fn ascendant_aspects(frame: &ChartFrame) -> Result<Vec<AspectRecord>, VedicError> {
    let mut out = Vec::new();
    for &body in &TABLE_BODIES {
        let lon = frame.position(body)?;
        if let Some((kind, delta)) = classify_aspect(frame.ascendant, lon) {
            out.push(AspectRecord {
                a: ChartPoint::Ascendant,
                b: body.into(),
                kind,
                delta,
            });
        }
    }
    Ok(out)
}

/// Merge two aspect lists, de-duplicating by unordered (a, b, kind).
///
/// Entries from `preferred` replace same-keyed entries from `base` in
/// place; the rest of `preferred` is appended in order.
pub fn merge_aspects(base: Vec<AspectRecord>, preferred: Vec<AspectRecord>) -> Vec<AspectRecord> {
    let mut out = base;
    let mut index: HashMap<_, usize> = out.iter().enumerate().map(|(i, r)| (r.key(), i)).collect();
    for rec in preferred {
        match index.get(&rec.key()) {
            Some(&i) => out[i] = rec,
            None => {
                index.insert(rec.key(), out.len());
                out.push(rec);
            }
        }
    }
    out
}

/// Pairwise and ascendant aspects for a frame, merged.
pub fn chart_aspects(frame: &ChartFrame) -> Result<Vec<AspectRecord>, VedicError> {
    Ok(merge_aspects(
        pairwise_aspects(frame)?,
        ascendant_aspects(frame)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use std::collections::BTreeMap;

    fn frame_with(asc: f64, lons: &[(Body, f64)]) -> ChartFrame {
        // Park unlisted bodies in the 200s.
        let mut positions = BTreeMap::new();
        for (i, b) in TABLE_BODIES.iter().enumerate() {
            positions.insert(*b, 200.0 + 7.0 * i as f64 + 0.5);
        }
        for &(b, l) in lons {
            positions.insert(b, l);
        }
        ChartFrame::new(asc, [0.0; 13], positions).unwrap()
    }

    #[test]
    fn exact_conjunction() {
        assert_eq!(classify_aspect(42.0, 42.0), Some((AspectKind::Conjunction, 0.0)));
    }

    #[test]
    fn opposition_within_orb() {
        let (kind, delta) = classify_aspect(0.0, 183.0).unwrap();
        assert_eq!(kind, AspectKind::Opposition);
        assert!((delta - 3.0).abs() < 1e-12);
    }

    #[test]
    fn orb_edges_inclusive() {
        assert_eq!(classify_aspect(0.0, 6.0).map(|a| a.0), Some(AspectKind::Conjunction));
        assert_eq!(classify_aspect(0.0, 6.5), None);
        assert_eq!(classify_aspect(0.0, 125.0).map(|a| a.0), Some(AspectKind::Trine));
        assert_eq!(classify_aspect(0.0, 64.0).map(|a| a.0), Some(AspectKind::Sextile));
        assert_eq!(classify_aspect(0.0, 64.5), None);
    }

    #[test]
    fn separation_wraps_around_zero() {
        let (kind, delta) = classify_aspect(358.0, 2.0).unwrap();
        assert_eq!(kind, AspectKind::Conjunction);
        assert!((delta - 4.0).abs() < 1e-12);
    }

    #[test]
    fn square_from_either_side() {
        assert_eq!(classify_aspect(10.0, 100.0).map(|a| a.0), Some(AspectKind::Square));
        assert_eq!(classify_aspect(100.0, 10.0).map(|a| a.0), Some(AspectKind::Square));
    }

    #[test]
    fn ascendant_entry_replaces_pairwise() {
        let base = vec![AspectRecord {
            a: Body::Sun.into(),
            b: ChartPoint::Ascendant,
            kind: AspectKind::Trine,
            delta: 1.0,
        }];
        let asc = vec![
            AspectRecord {
                a: ChartPoint::Ascendant,
                b: Body::Sun.into(),
                kind: AspectKind::Trine,
                delta: 2.0,
            },
            AspectRecord {
                a: ChartPoint::Ascendant,
                b: Body::Moon.into(),
                kind: AspectKind::Square,
                delta: 0.5,
            },
        ];
        let merged = merge_aspects(base, asc);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].a, ChartPoint::Ascendant);
        assert!((merged[0].delta - 2.0).abs() < 1e-12);
        assert_eq!(merged[1].b, ChartPoint::Body(Body::Moon));
    }

    #[test]
    fn chart_aspects_finds_sun_moon_and_ascendant() {
        let f = frame_with(10.0, &[(Body::Sun, 10.0), (Body::Moon, 190.0)]);
        let all = chart_aspects(&f).unwrap();
        let sun_moon = all
            .iter()
            .find(|r| r.a == Body::Sun.into() && r.b == Body::Moon.into())
            .unwrap();
        assert_eq!(sun_moon.kind, AspectKind::Opposition);
        assert!(all.iter().any(|r| r.a == ChartPoint::Ascendant
            && r.b == Body::Sun.into()
            && r.kind == AspectKind::Conjunction));
        assert!(all.iter().any(|r| r.a == ChartPoint::Ascendant
            && r.b == Body::Moon.into()
            && r.kind == AspectKind::Opposition));
        assert!(all.iter().all(|r| r.delta <= 6.0));
    }

    #[test]
    fn missing_body_is_error() {
        let f = ChartFrame::new(0.0, [0.0; 13], BTreeMap::from([(Body::Sun, 1.0)])).unwrap();
        assert!(pairwise_aspects(&f).is_err());
    }
}
