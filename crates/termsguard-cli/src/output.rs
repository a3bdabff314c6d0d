//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use termsguard_domain::{AnalysisOutcome, DocumentAnalysis, Grade};
use termsguard_engine::{Catalog, WeightTable};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis outcome.
    pub fn format_outcome(&self, outcome: &AnalysisOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome.analysis())?),
            OutputFormat::Table => {
                let mut sections = Vec::new();
                if let Some(reason) = outcome.reason() {
                    sections.push(self.warning(&format!("Analysis degraded: {}", reason)));
                }
                sections.push(self.format_analysis_table(outcome.analysis()));
                Ok(sections.join("\n\n"))
            }
        }
    }

    /// Format an analysis as a set of tables.
    fn format_analysis_table(&self, analysis: &DocumentAnalysis) -> String {
        let details = &analysis.details;
        let mut sections = Vec::new();

        let grade = format!("{} ({})", analysis.grade, analysis.grade.label());
        let mut builder = Builder::default();
        builder.push_record(["Score", "Grade", "Confidence", "Words", "Chunks", "Signals"]);
        builder.push_record([
            format!("{:.1}", analysis.rights_score),
            self.colorize_grade(analysis.grade, &grade),
            format!("{:.2}", analysis.confidence),
            details.word_count.to_string(),
            details.chunk_count.to_string(),
            details.clause_signals.to_string(),
        ]);
        sections.push(render(builder));

        let matched: Vec<_> = details
            .clause_counts
            .iter()
            .filter(|(_, _, count)| *count > 0)
            .collect();
        if matched.is_empty() {
            sections.push(self.info("No clause patterns matched."));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Clause", "Count"]);
            for (category, key, count) in matched {
                builder.push_record([category.to_string(), key.to_string(), count.to_string()]);
            }
            sections.push(render(builder));
        }

        if !details.category_scores.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Rights Category", "Raw", "Adjusted", "Score"]);
            for (name, score) in &details.category_scores {
                builder.push_record([
                    name.clone(),
                    format!("{:.1}", score.raw),
                    format!("{:.2}", score.adjusted),
                    format!("{:.1}", score.score),
                ]);
            }
            sections.push(render(builder));
        }

        if let Some(ml) = &details.ml_category_scores {
            let mut builder = Builder::default();
            builder.push_record(["ML Category", "Observations", "Probability", "Score"]);
            for (name, score) in ml {
                builder.push_record([
                    name.clone(),
                    score.observations.to_string(),
                    format!("{:.2}", score.probability),
                    format!("{:.1}", score.score),
                ]);
            }
            sections.push(render(builder));
        }

        if !details.dictionary_terms.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Term", "Count", "Definition"]);
            for term in &details.dictionary_terms {
                builder.push_record([term.word.clone(), term.count.to_string(), term.definition.clone()]);
            }
            sections.push(render(builder));
        }

        sections.join("\n")
    }

    /// Format the clause catalog together with its weights.
    pub fn format_patterns(&self, catalog: &Catalog, weights: &WeightTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let patterns: Vec<serde_json::Value> = catalog
                    .patterns()
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "category": p.category.as_str(),
                            "key": p.key,
                            "pattern": p.pattern,
                            "weight": weights.weight(p.category, &p.key),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&patterns)?)
            }
            OutputFormat::Table => {
                if catalog.is_empty() {
                    return Ok(self.warning("Catalog is empty."));
                }

                let mut builder = Builder::default();
                builder.push_record(["Category", "Clause", "Weight", "Pattern"]);
                for pattern in catalog.patterns() {
                    let weight = weights.weight(pattern.category, &pattern.key);
                    let weight_text = format!("{:+.1}", weight);
                    let weight_cell = if weight < 0.0 {
                        self.colorize(&weight_text, "red")
                    } else if weight > 0.0 {
                        self.colorize(&weight_text, "green")
                    } else {
                        weight_text
                    };
                    builder.push_record([
                        pattern.category.to_string(),
                        pattern.key.clone(),
                        weight_cell,
                        pattern.pattern.clone(),
                    ]);
                }

                let caps = format!(
                    "Caps: negative {:.1}, positive {:+.1}",
                    weights.caps.max_negative, weights.caps.max_positive
                );
                Ok(format!("{}\n{}", render(builder), self.info(&caps)))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize_grade(&self, grade: Grade, text: &str) -> String {
        let color = match grade {
            Grade::A | Grade::B => "green",
            Grade::C => "yellow",
            Grade::D | Grade::F => "red",
        };
        self.colorize(text, color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termsguard_domain::{
        AnalysisDetails, Category, ClauseCounts, DegradedReason, DictionaryTerm, UncommonWord,
    };

    fn create_test_analysis() -> DocumentAnalysis {
        let mut counts = ClauseCounts::new();
        counts.add(Category::HighRisk, "ARBITRATION", 2);
        counts.ensure(Category::Positives, "CLEAR_OPT_OUT");
        DocumentAnalysis {
            rights_score: 72.5,
            grade: Grade::C,
            confidence: 0.63,
            uncommon_words: vec![UncommonWord {
                word: "arbitration".to_string(),
                definition: "Dispute resolution outside the courts.".to_string(),
            }],
            details: AnalysisDetails {
                chunk_count: 1,
                average_score: 72.5,
                clause_signals: 2,
                word_count: 120,
                clause_counts: counts,
                dictionary_terms: vec![DictionaryTerm {
                    word: "arbitration".to_string(),
                    count: 2,
                    definition: "Dispute resolution outside the courts.".to_string(),
                }],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let outcome = AnalysisOutcome::Complete(create_test_analysis());
        let output = formatter.format_outcome(&outcome).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["rightsScore"], 72.5);
        assert_eq!(value["grade"], "C");
        assert_eq!(value["details"]["clauseCounts"]["HIGH_RISK"]["ARBITRATION"], 2);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let outcome = AnalysisOutcome::Complete(create_test_analysis());
        let output = formatter.format_outcome(&outcome).unwrap();

        assert!(output.contains("72.5"));
        assert!(output.contains("C (Fair)"));
        assert!(output.contains("ARBITRATION"));
        assert!(output.contains("Dispute resolution outside the courts."));
        assert!(!output.contains("CLEAR_OPT_OUT"));
        assert!(!output.contains("degraded"));
    }

    #[test]
    fn test_degraded_warning() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let outcome = AnalysisOutcome::Degraded {
            analysis: create_test_analysis(),
            reason: DegradedReason::TextTooLong { len: 10, max: 5 },
        };
        let output = formatter.format_outcome(&outcome).unwrap();
        assert!(output.starts_with("⚠ Analysis degraded: Text too long"));
    }

    #[test]
    fn test_patterns_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_patterns(&Catalog::builtin(), &WeightTable::builtin())
            .unwrap();
        assert!(output.contains("CLASS_ACTION_WAIVER"));
        assert!(output.contains("+5.0"));
        assert!(output.contains("Caps: negative -60.0, positive +20.0"));
    }

    #[test]
    fn test_patterns_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let catalog = Catalog::builtin();
        let output = formatter
            .format_patterns(&catalog, &WeightTable::builtin())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), catalog.len());
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
