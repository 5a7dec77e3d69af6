use crate::core::Patient;
use crate::metrics::clinical::DistributionBucket;
use crate::metrics::stratification::RiskStratification;
use crate::metrics::ConditionControl;
use crate::report::{
    HeatMapReport, OverviewReport, PriorityReport, RegistryReport, Report, RouteReport,
};
use clap::ValueEnum;
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;

    /// Push buffered output to the destination, surfacing write failures.
    fn flush(&mut self) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Overview(r) => self.write_overview(r),
            Report::Priority(r) => self.write_priority(r),
            Report::HeatMap(r) => self.write_heatmap(r),
            Report::Registry(r) => self.write_registry(r),
            Report::Route(r) => self.write_route(r),
        }
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_overview(&mut self, r: &OverviewReport) -> anyhow::Result<()> {
        let o = &r.overview;
        writeln!(self.writer, "# Population Health Overview")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "As of: {}", r.as_of.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Population | {} |", o.total_population)?;
        writeln!(self.writer, "| Registered | {} |", o.total_registered)?;
        writeln!(
            self.writer,
            "| Screening coverage | {:.1}% |",
            o.screening_coverage_percent
        )?;
        writeln!(self.writer, "| Uncontrolled (units) | {} |", o.total_uncontrolled)?;
        writeln!(self.writer, "| HTN control | {} |", control_text(&o.htn_control))?;
        writeln!(self.writer, "| DM control | {} |", control_text(&o.dm_control))?;
        writeln!(self.writer, "| High-risk patients | {} |", o.high_risk_patients)?;
        writeln!(self.writer, "| Flagged for follow-up | {} |", o.flagged_for_follow_up)?;
        writeln!(self.writer, "| Data quality issues | {} |", r.data_quality_issues)?;
        writeln!(self.writer)?;

        self.write_stratification("HTN Risk Stratification", &o.htn_stratification)?;
        self.write_stratification("DM Risk Stratification", &o.dm_stratification)?;

        writeln!(self.writer, "## Outreach Targets")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Condition | Barangay | Uncontrolled | Registered |")?;
        writeln!(self.writer, "|-----------|----------|--------------|------------|")?;
        for (label, targets) in [("HTN", &r.htn_outreach), ("DM", &r.dm_outreach)] {
            for t in targets {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} |",
                    label, t.name, t.uncontrolled, t.registered
                )?;
            }
        }
        writeln!(self.writer)?;

        self.write_distribution("Age Groups", &r.age_distribution)?;
        self.write_distribution("Blood Pressure", &r.bp_distribution)?;
        self.write_distribution("BMI", &r.bmi_distribution)?;
        self.write_distribution("Fasting Blood Glucose", &r.fbg_distribution)?;
        self.write_distribution("Random Blood Glucose", &r.rbg_distribution)?;
        Ok(())
    }

    fn write_stratification(&mut self, title: &str, s: &RiskStratification) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Tier | Patients | Share |")?;
        writeln!(self.writer, "|------|----------|-------|")?;
        for share in &s.tiers {
            writeln!(
                self.writer,
                "| {} | {} | {}% |",
                share.tier.label(),
                share.count,
                share.percent
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, title: &str, buckets: &[DistributionBucket]) -> anyhow::Result<()> {
        writeln!(self.writer, "### {}", title)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Range | Count | Percent |")?;
        writeln!(self.writer, "|-------|-------|---------|")?;
        for b in buckets {
            writeln!(self.writer, "| {} | {} | {:.1}% |", b.label, b.count, b.percent)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_priority(&mut self, r: &PriorityReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Field Visit Priority")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} units: {} urgent, {} high, {} moderate, {} routine",
            r.total_units, r.counts.urgent, r.counts.high, r.counts.moderate, r.counts.routine
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| # | Barangay | Control Rate | Days Since Clinic | Score | Level |"
        )?;
        writeln!(
            self.writer,
            "|---|----------|--------------|-------------------|-------|-------|"
        )?;
        for (i, u) in r.units.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {:.1}% | {} | {:.1} | {} |",
                i + 1,
                u.unit_name,
                u.control_rate,
                u.days_since_last_clinic,
                u.priority_score,
                u.level
            )?;
        }
        Ok(())
    }

    fn write_heatmap(&mut self, r: &HeatMapReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Heat Map: {}", r.metric.label())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Range {:.0} to {:.0}, average {:.1}",
            r.stats.min, r.stats.max, r.stats.average
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Barangay | Value | Band | Color |")?;
        writeln!(self.writer, "|----------|-------|------|-------|")?;
        for u in &r.units {
            writeln!(
                self.writer,
                "| {} | {:.0} | {} | `{}` |",
                u.unit_name, u.value, u.bucket.bucket_label, u.bucket.color
            )?;
        }
        Ok(())
    }

    fn write_registry(&mut self, r: &RegistryReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Patient Registry")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{} patients{}", r.total, sort_caption(r))?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| ID | Name | Age | Sex | Barangay | Conditions | Last Visit | Next Due | Risk | Control | Follow-up |"
        )?;
        writeln!(
            self.writer,
            "|----|------|-----|-----|----------|------------|------------|----------|------|---------|-----------|"
        )?;
        for p in &r.patients {
            let row = registry_row(p);
            writeln!(self.writer, "| {} |", row.join(" | "))?;
        }
        Ok(())
    }

    fn write_route(&mut self, r: &RouteReport) -> anyhow::Result<()> {
        let s = &r.summary;
        writeln!(self.writer, "# Today's Route")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} visits, {} urgent, {:.1} km, about {:.1} hours",
            s.visit_count,
            s.total_urgent,
            s.total_distance_km,
            s.estimated_hours()
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Barangay | Visits | Urgent |")?;
        writeln!(self.writer, "|----------|--------|--------|")?;
        for g in &s.groups {
            writeln!(self.writer, "| {} | {} | {} |", g.unit_name, g.visit_count, g.urgent_count)?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "## Visits")?;
        writeln!(self.writer)?;
        for v in &r.visits {
            writeln!(
                self.writer,
                "- **{}** {} ({}): {}",
                v.urgency, display_name(&v.patient_name, &v.patient_id), v.barangay, v.reason
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        match report {
            Report::Overview(r) => self.print_overview(r),
            Report::Priority(r) => self.print_priority(r),
            Report::HeatMap(r) => self.print_heatmap(r),
            Report::Registry(r) => self.print_registry(r),
            Report::Route(r) => self.print_route(r),
        }
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(title.chars().count()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_overview(&mut self, r: &OverviewReport) -> anyhow::Result<()> {
        let o = &r.overview;
        self.print_header("HealthHive Population Overview")?;
        writeln!(self.writer, "  Population:          {}", o.total_population)?;
        writeln!(
            self.writer,
            "  Registered:          {} ({:.1}% coverage)",
            o.total_registered, o.screening_coverage_percent
        )?;
        writeln!(
            self.writer,
            "  HTN control:         {}",
            rate_colored(o.htn_control.control_rate_percent, &control_text(&o.htn_control))
        )?;
        writeln!(
            self.writer,
            "  DM control:          {}",
            rate_colored(o.dm_control.control_rate_percent, &control_text(&o.dm_control))
        )?;
        writeln!(self.writer, "  High-risk patients:  {}", o.high_risk_patients.to_string().red())?;
        writeln!(self.writer, "  Flagged follow-ups:  {}", o.flagged_for_follow_up)?;
        if r.data_quality_issues > 0 {
            writeln!(
                self.writer,
                "  {} {} records with data quality issues",
                "!".yellow().bold(),
                r.data_quality_issues
            )?;
        }
        writeln!(self.writer)?;

        let counts = &r.priority_counts;
        writeln!(
            self.writer,
            "  Units by priority:   {} urgent, {} high, {} moderate, {} routine",
            counts.urgent.to_string().red().bold(),
            counts.high.to_string().yellow(),
            counts.moderate,
            counts.routine.to_string().green()
        )?;
        writeln!(self.writer)?;

        for (label, targets) in [("HTN", &r.htn_outreach), ("DM", &r.dm_outreach)] {
            writeln!(self.writer, "  {} outreach targets:", label.bold())?;
            for (i, t) in targets.iter().enumerate() {
                writeln!(
                    self.writer,
                    "    {}. {} - {} uncontrolled of {} registered",
                    i + 1,
                    t.name.yellow(),
                    t.uncontrolled,
                    t.registered
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_priority(&mut self, r: &PriorityReport) -> anyhow::Result<()> {
        self.print_header("Field Visit Priority")?;
        for (i, u) in r.units.iter().enumerate() {
            writeln!(
                self.writer,
                "  {:>2}. {:<20} score {:>6.1}  control {:>5.1}%  {:>3}d since clinic  {}",
                i + 1,
                u.unit_name,
                u.priority_score,
                u.control_rate,
                u.days_since_last_clinic,
                swatch(u.level.label(), u.color)
            )?;
        }
        if r.units.len() < r.total_units {
            writeln!(
                self.writer,
                "  ... {} more units",
                r.total_units - r.units.len()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_heatmap(&mut self, r: &HeatMapReport) -> anyhow::Result<()> {
        self.print_header(&format!("Heat Map: {}", r.metric.label()))?;
        for u in &r.units {
            writeln!(
                self.writer,
                "  {:<20} {:>5.0}  {}",
                u.unit_name,
                u.value,
                swatch(&u.bucket.bucket_label, &u.bucket.color)
            )?;
        }
        writeln!(self.writer)?;
        let legend: Vec<String> = r
            .bands
            .iter()
            .map(|b| format!("{} {}+", swatch(&b.label, &b.color), b.threshold))
            .collect();
        writeln!(self.writer, "  Legend: {}", legend.join("  "))?;
        Ok(())
    }

    fn print_registry(&mut self, r: &RegistryReport) -> anyhow::Result<()> {
        self.print_header("Patient Registry")?;
        writeln!(self.writer, "  {} patients{}", r.total, sort_caption(r))?;
        writeln!(self.writer)?;
        for p in &r.patients {
            let flag = if p.flagged_for_follow_up {
                "follow-up".red().to_string()
            } else {
                String::new()
            };
            writeln!(
                self.writer,
                "  {:<10} {:<22} {:<12} {:<10} {:<12} {}",
                p.id,
                display_name(&p.name, &p.id),
                p.barangay,
                risk_colored(p),
                p.control_status,
                flag
            )?;
        }
        Ok(())
    }

    fn print_route(&mut self, r: &RouteReport) -> anyhow::Result<()> {
        let s = &r.summary;
        self.print_header("Today's Route")?;
        for g in &s.groups {
            let urgent = if g.urgent_count > 0 {
                format!("{} urgent", g.urgent_count).red().to_string()
            } else {
                String::new()
            };
            writeln!(
                self.writer,
                "  {:<20} {} visits  {}",
                g.unit_name, g.visit_count, urgent
            )?;
        }
        writeln!(self.writer)?;
        for v in &r.visits {
            writeln!(
                self.writer,
                "  {} {} ({}) - {}",
                swatch(v.urgency.label(), v.color),
                display_name(&v.patient_name, &v.patient_id),
                v.barangay,
                v.reason
            )?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "  Total: {} visits, {} urgent, {:.1} km, ~{:.1} h",
            s.visit_count,
            s.total_urgent.to_string().red().bold(),
            s.total_distance_km,
            s.estimated_hours()
        )?;
        Ok(())
    }
}

/// Parse `#RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn swatch(label: &str, color: &str) -> ColoredString {
    match hex_to_rgb(color) {
        Some((r, g, b)) => label.truecolor(r, g, b).bold(),
        None => label.normal(),
    }
}

fn rate_colored(rate: f64, text: &str) -> ColoredString {
    match rate {
        x if x >= 70.0 => text.green(),
        x if x >= 40.0 => text.yellow(),
        _ => text.red(),
    }
}

fn risk_colored(p: &Patient) -> ColoredString {
    let label = p.risk.as_str();
    if p.risk.is_high_risk() {
        label.red()
    } else {
        label.normal()
    }
}

fn control_text(c: &ConditionControl) -> String {
    format!(
        "{:.1}% ({} of {})",
        c.control_rate_percent, c.controlled, c.eligible
    )
}

fn display_name<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.is_empty() {
        id
    } else {
        name
    }
}

fn sort_caption(r: &RegistryReport) -> String {
    match r.sort.field {
        Some(field) if r.sort.is_active() => {
            format!(", sorted by {} {}", field.label(), r.sort.direction.indicator())
        }
        _ => String::new(),
    }
}

fn registry_row(p: &Patient) -> Vec<String> {
    let conditions: Vec<&str> = p.conditions.iter().map(|c| c.as_str()).collect();
    vec![
        p.id.clone(),
        p.name.clone(),
        p.age.map(|a| a.to_string()).unwrap_or_default(),
        p.sex.map(|s| s.as_str().to_string()).unwrap_or_default(),
        p.barangay.clone(),
        conditions.join(", "),
        p.last_visit.display(),
        p.next_due.display(),
        p.risk.to_string(),
        p.control_status.to_string(),
        if p.flagged_for_follow_up { "Yes" } else { "No" }.to_string(),
    ]
}

pub fn create_writer(format: OutputFormat, destination: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
    }
}
