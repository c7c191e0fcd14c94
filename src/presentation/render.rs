use crate::domain::dashboard::DashboardView;
use crate::domain::model::{GeocodeResult, ResolutionCache};
use crate::domain::resolver::distinct_in_order;
use crate::presentation::theme::Theme;
use std::fmt::Write;

fn format_location(result: &GeocodeResult, theme: &Theme) -> String {
    match result.coordinates() {
        Some(c) => (theme.coords)(&format!("{:.4}, {:.4}", c.latitude, c.longitude)),
        None => (theme.unresolved)("not on map"),
    }
}

/// Ad-hoc resolution output, in the order the names were given.
pub fn format_resolution(names: &[String], cache: &ResolutionCache, theme: &Theme) -> String {
    let mut output = String::new();

    for name in distinct_in_order(names) {
        let result = cache.lookup(&name);
        writeln!(
            output,
            "  {}  {}",
            (theme.place)(&name),
            format_location(&result, theme)
        )
        .ok();
    }

    output
}

pub fn format_view(view: &DashboardView, theme: &Theme, enable_emoji: bool) -> String {
    let mut output = String::new();
    let cutoff = "⸺".repeat(40);

    let title = if enable_emoji {
        "🗺️  Feiras e Eventos Agro"
    } else {
        "Feiras e Eventos Agro"
    };
    writeln!(output, "{}", (theme.title)(title)).ok();
    writeln!(
        output,
        "  {} of {} events, {} markers, {} not on map",
        view.table.len(),
        view.total,
        view.map.markers.len(),
        view.unmapped
    )
    .ok();
    writeln!(output).ok();

    writeln!(
        output,
        "  {}",
        (theme.header)(&format!(
            "{:<3} {:<16} {:<32} {:<18} {:<16} {}",
            "#", "ID", "Evento", "Datas", "Segmento", "Local"
        ))
    )
    .ok();
    writeln!(output, "  {}", (theme.line)(&cutoff)).ok();

    for (i, row) in view.table.iter().enumerate() {
        let place = format!("{}, {}", row.city, row.state);
        let place = if row.mapped {
            (theme.place)(&place)
        } else {
            (theme.unresolved)(&place)
        };
        let name = format!("{:<32}", row.name);
        let name = if row.selected {
            (theme.selected)(&name)
        } else {
            (theme.name)(&name)
        };
        writeln!(
            output,
            "  {} {:<16} {} {:<18} {:<16} {}",
            (theme.idx)(&format!("{:<3}", i + 1)),
            row.id.as_str(),
            name,
            row.dates,
            row.segment,
            place
        )
        .ok();
    }

    if let Some(detail) = &view.detail {
        let record = &detail.event.record;
        writeln!(output).ok();
        writeln!(output, "  {}", (theme.line)(&cutoff)).ok();
        let pin = if enable_emoji { "📍 " } else { "" };
        writeln!(output, "  {}{}", pin, (theme.title)(&record.name)).ok();
        writeln!(output, "    {} {}", (theme.label)("Data:"), record.dates).ok();
        writeln!(output, "    {} {}", (theme.label)("Mês:"), record.month).ok();
        writeln!(output, "    {} {}", (theme.label)("Segmento:"), record.segment).ok();
        writeln!(
            output,
            "    {} {}, {} ({})",
            (theme.label)("Local:"),
            record.city,
            record.state,
            format_location(&detail.event.location, theme)
        )
        .ok();

        if detail.exhibitors.is_empty() {
            writeln!(
                output,
                "    {}",
                (theme.unresolved)("no exhibitor list for this event")
            )
            .ok();
        } else {
            writeln!(output, "    {}", (theme.label)("Expositores:")).ok();
            for exhibitor in &detail.exhibitors {
                let mut line = exhibitor.name.clone();
                if let Some(booth) = &exhibitor.booth {
                    line.push_str(&format!("  [{}]", booth));
                }
                if let Some(segment) = &exhibitor.segment {
                    line.push_str(&format!("  ({})", segment));
                }
                writeln!(output, "      • {}", line).ok();
            }
        }
    }

    writeln!(output).ok();
    output
}
