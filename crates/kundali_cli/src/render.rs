//! Plain-text chart rendering.

use std::fmt::Write as _;

use kundali_chart::ChartReport;
use kundali_vedic_base::{ChartFrame, ChartPoint, format_sign_degree, table_points};

fn frame_rows(out: &mut String, title: &str, frame: &ChartFrame) {
    let _ = writeln!(out, "{title}");
    for point in table_points() {
        if let Ok(lon) = frame.point(point) {
            let _ = writeln!(out, "  {:<10} {:>9.4}  {}", point.name(), lon, format_sign_degree(lon));
        }
    }
    let cusps: Vec<String> = frame.cusps[1..].iter().map(|c| format!("{c:.2}")).collect();
    let _ = writeln!(out, "  cusps      {}", cusps.join(" "));
}

pub fn render_chart(r: &ChartReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Engine     {}", r.engine);
    let _ = writeln!(out, "JD (UT)    {:.6}", r.jd_ut);
    let _ = writeln!(out, "Local      {} ({})", r.timezone.local_time, r.timezone.resolved);
    if let Some(corrected) = &r.timezone.corrected {
        let _ = writeln!(out, "           timezone corrected to {corrected}");
    }
    let _ = writeln!(out, "LST        {} ({:.6} h)", r.lst_hms, r.lst_hours);
    let _ = writeln!(out, "Ayanamsa   {:.6}", r.ayanamsa);
    let _ = writeln!(out, "Houses     {}", r.house_system);
    let _ = writeln!(
        out,
        "Sunrise    {}\nSunset     {}",
        r.sunrise.as_deref().unwrap_or("-"),
        r.sunset.as_deref().unwrap_or("-")
    );
    out.push('\n');

    frame_rows(&mut out, "D1 (rasi)", &r.d1);
    out.push('\n');
    frame_rows(&mut out, "D9 (navamsa)", &r.d9);
    out.push('\n');

    let _ = writeln!(out, "Nakshatras");
    for n in &r.nakshatras {
        let _ = writeln!(
            out,
            "  {:<10} {:<12} {:<18} pada {}  lord {}",
            n.body.name(),
            n.sign,
            n.nakshatra,
            n.pada,
            n.lord
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Vimshottari dasha");
    for d in &r.dasha {
        let _ = writeln!(out, "  {:<8} {} .. {}  ({:.2} y)", d.lord.name(), d.start, d.end, d.years);
    }
    out.push('\n');

    let p = &r.panchanga;
    let _ = writeln!(out, "Panchanga");
    let _ = writeln!(out, "  vaar      {}", p.weekday);
    let _ = writeln!(out, "  tithi     {} {} ({})", p.tithi_number, p.tithi_name, p.paksha.name());
    let _ = writeln!(out, "  nakshatra {} pada {}", p.nakshatra, p.pada);
    let _ = writeln!(out, "  yoga      {}", p.yoga);
    let _ = writeln!(out, "  karana    {}", p.karana);
    out.push('\n');

    let _ = writeln!(out, "Aspects");
    if r.aspects.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for a in &r.aspects {
        let marker = if a.a == ChartPoint::Ascendant { "*" } else { " " };
        let _ = writeln!(
            out,
            " {marker}{:<10} {:<12} {:<10} {:.2}",
            a.a.name(),
            a.kind.name(),
            a.b.name(),
            a.delta
        );
    }
    out
}
