//! Terminal summaries: the loaded model card and offline scoring results

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::predictions::ScoredBatch;
use crate::model::{LogitModel, Model};
use crate::scoring::ScoringTimings;

/// Summary of one offline scoring run
#[derive(Debug, Default)]
pub struct ScoringSummary {
    pub rows: usize,
    pub events: usize,
    pub mean_phat: Option<f64>,
    pub threshold: f64,
    pub load_time: Option<Duration>,
    pub scoring: Option<ScoringTimings>,
    pub save_time: Option<Duration>,
}

impl ScoringSummary {
    pub fn new(scored: &ScoredBatch, threshold: f64) -> Self {
        let finite: Vec<f64> = scored.phat().iter().copied().filter(|p| p.is_finite()).collect();
        let mean_phat = if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        };

        Self {
            rows: scored.len(),
            events: scored.event_count(),
            mean_phat,
            threshold,
            ..Default::default()
        }
    }

    pub fn non_events(&self) -> usize {
        self.rows - self.events
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn set_scoring_timings(&mut self, timings: ScoringTimings) {
        self.scoring = Some(timings);
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = Some(elapsed);
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Scored"), Cell::new(self.rows)]);
        table.add_row(vec![
            Cell::new(format!("🎯 Events (phat >= {:.2})", self.threshold)),
            Cell::new(self.events)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![Cell::new("   Non-Events"), Cell::new(self.non_events())]);
        table.add_row(vec![
            Cell::new("📈 Mean phat"),
            Cell::new(
                self.mean_phat
                    .map_or_else(|| "n/a".to_string(), |m| format!("{:.4}", m)),
            ),
        ]);

        let timings = [
            ("⏱  Load", self.load_time),
            ("⏱  Preprocess", self.scoring.map(|t| t.preprocess)),
            ("⏱  Predict", self.scoring.map(|t| t.predict)),
            ("⏱  Postprocess", self.scoring.map(|t| t.postprocess)),
            ("⏱  Save", self.save_time),
        ];
        for (label, elapsed) in timings {
            if let Some(elapsed) = elapsed {
                table.add_row(vec![Cell::new(label), Cell::new(format_duration(elapsed)).fg(Color::Cyan)]);
            }
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SCORING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Description of the model loaded at startup
#[derive(Debug)]
pub struct ModelCard {
    pub name: String,
    pub path: String,
    pub loaded_at: DateTime<Local>,
    pub intercept: f64,
    pub coefficients: Vec<(String, f64)>,
}

impl ModelCard {
    pub fn new(model: &LogitModel, path: &Path) -> Self {
        Self {
            name: model.name().to_string(),
            path: path.display().to_string(),
            loaded_at: Local::now(),
            intercept: model.intercept(),
            coefficients: model
                .feature_names()
                .iter()
                .cloned()
                .zip(model.coefficients().iter().copied())
                .collect(),
        }
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Coefficient").add_attribute(Attribute::Bold),
        ]);

        for (feature, coefficient) in &self.coefficients {
            let color = if *coefficient >= 0.0 { Color::Green } else { Color::Red };
            table.add_row(vec![
                Cell::new(feature),
                Cell::new(format!("{:+.6}", coefficient))
                    .fg(color)
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        table.add_row(vec![
            Cell::new("(intercept)").add_attribute(Attribute::Italic),
            Cell::new(format!("{:+.6}", self.intercept)).set_alignment(CellAlignment::Right),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {} {}",
            style("🧮").cyan(),
            style("MODEL").white().bold(),
            style(&self.name).yellow()
        );
        println!(
            "    {}",
            style(format!(
                "{} · loaded {}",
                self.path,
                self.loaded_at.format("%Y-%m-%d %H:%M:%S")
            ))
            .dim()
        );
        println!("    {}", style("─".repeat(50)).dim());

        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }
        println!();
    }
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.1}ms", secs * 1000.0)
    }
}
