//! Structured tool actions the backend can invoke on the surface.
//!
//! Action argument bags arrive as untyped JSON; they are validated into
//! explicit record types at this boundary, and malformed payloads are
//! rejected before any state is touched.

use serde_json::Value;

use crate::error::ActionError;

/// Name of the legal-analysis rendering action.
pub const LEGAL_ANALYSIS: &str = "legal_analysis";

/// Validated payload of the `legal_analysis` action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalAnalysis {
    /// Legal area the analysis covers (e.g. "Societário").
    pub area: String,
    /// The analysis body.
    pub analysis: String,
    /// Optional recommendations; empty when the backend sent none.
    pub recommendations: Vec<String>,
}

fn required_str(args: &serde_json::Map<String, Value>, field: &'static str) -> Result<String, ActionError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ActionError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ActionError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

impl LegalAnalysis {
    /// Validate an untyped argument bag.
    pub fn from_args(args: &Value) -> Result<Self, ActionError> {
        let args = args.as_object().ok_or(ActionError::InvalidField {
            field: "args",
            expected: "an object",
        })?;

        let area = required_str(args, "area")?;
        let analysis = required_str(args, "analysis")?;

        let recommendations = match args.get("recommendations") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or(ActionError::InvalidField {
                        field: "recommendations",
                        expected: "an array of strings",
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ActionError::InvalidField {
                    field: "recommendations",
                    expected: "an array of strings",
                });
            }
        };

        Ok(Self {
            area,
            analysis,
            recommendations,
        })
    }

    /// Render the analysis card as markdown: area heading, analysis body,
    /// and a bulleted recommendations list when non-empty.
    pub fn render_card(&self) -> String {
        let mut card = format!("## Análise Jurídica - {}\n\n{}\n", self.area, self.analysis);
        if !self.recommendations.is_empty() {
            card.push_str("\n### Recomendações:\n");
            for recommendation in &self.recommendations {
                card.push_str("- ");
                card.push_str(recommendation);
                card.push('\n');
            }
        }
        card
    }
}
