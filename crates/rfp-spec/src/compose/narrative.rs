use std::sync::LazyLock;

use handlebars::Handlebars;
use serde_json::{Value, json};
use tracing::warn;

use crate::compose::format::NOT_AVAILABLE;

/// Fixed sentence templates that turn a raw answer into prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrative {
    RetailPresence,
    WarrantyProgram,
    WarrantyInterest,
    SubscriptionProgram,
    SubscriptionInterest,
    BrandedDtc,
    ManagementPreference,
    TradeIn,
    ValuePriority,
    OpportunityFeeling,
    CombineStrategy,
}

enum Forms {
    YesNo {
        yes: &'static str,
        no: &'static str,
    },
    Named(&'static str),
}

impl Narrative {
    const ALL: [Narrative; 11] = [
        Narrative::RetailPresence,
        Narrative::WarrantyProgram,
        Narrative::WarrantyInterest,
        Narrative::SubscriptionProgram,
        Narrative::SubscriptionInterest,
        Narrative::BrandedDtc,
        Narrative::ManagementPreference,
        Narrative::TradeIn,
        Narrative::ValuePriority,
        Narrative::OpportunityFeeling,
        Narrative::CombineStrategy,
    ];

    fn name(&self) -> &'static str {
        match self {
            Narrative::RetailPresence => "retail_presence",
            Narrative::WarrantyProgram => "warranty_program",
            Narrative::WarrantyInterest => "warranty_interest",
            Narrative::SubscriptionProgram => "subscription_program",
            Narrative::SubscriptionInterest => "subscription_interest",
            Narrative::BrandedDtc => "branded_dtc",
            Narrative::ManagementPreference => "management_preference",
            Narrative::TradeIn => "trade_in",
            Narrative::ValuePriority => "value_priority",
            Narrative::OpportunityFeeling => "opportunity_feeling",
            Narrative::CombineStrategy => "combine_strategy",
        }
    }

    fn forms(&self) -> Forms {
        match self {
            Narrative::RetailPresence => Forms::YesNo {
                yes: "{{subject}} sells into retailers.",
                no: "{{subject}} does not sell into retailers.",
            },
            Narrative::WarrantyProgram => Forms::YesNo {
                yes: "{{subject}} currently operates a warranty program.",
                no: "{{subject}} does not currently operate a warranty program.",
            },
            Narrative::WarrantyInterest => Forms::YesNo {
                yes: "{{subject}} is interested in establishing a warranty program.",
                no: "{{subject}} is not currently interested in a warranty program.",
            },
            Narrative::SubscriptionProgram => Forms::YesNo {
                yes: "{{subject}} currently operates a subscription program.",
                no: "{{subject}} does not currently operate a subscription program.",
            },
            Narrative::SubscriptionInterest => Forms::YesNo {
                yes: "{{subject}} is interested in establishing a subscription program.",
                no: "{{subject}} is not currently interested in a subscription program.",
            },
            Narrative::BrandedDtc => Forms::YesNo {
                yes: "{{subject}} is interested in a branded second-hand DTC program.",
                no: "{{subject}} is not currently interested in a branded second-hand DTC program.",
            },
            Narrative::ManagementPreference => {
                Forms::Named("Preferred management approach: {{value}}.")
            }
            Narrative::TradeIn => Forms::YesNo {
                yes: "{{subject}} is interested in a Trade-In program.",
                no: "{{subject}} is not currently interested in a Trade-In program.",
            },
            Narrative::ValuePriority => Forms::Named(
                "{{subject}} identifies {{value}} as a primary driver for the reverse logistics program.",
            ),
            Narrative::OpportunityFeeling => Forms::YesNo {
                yes: "{{subject}} feels it is currently taking advantage of return opportunities.",
                no: "{{subject}} does not feel it is currently taking advantage of return opportunities.",
            },
            Narrative::CombineStrategy => Forms::YesNo {
                yes: "{{subject}} is interested in combining excess inventory strategy with returns to create a broad recommerce strategy.",
                no: "{{subject}} is not currently interested in combining excess inventory strategy with returns.",
            },
        }
    }
}

const SUBJECT: &str = "The brand";

static ENGINE: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut engine = Handlebars::new();
    engine.register_escape_fn(handlebars::no_escape);
    engine.set_strict_mode(true);
    for narrative in Narrative::ALL {
        let templates = match narrative.forms() {
            Forms::YesNo { yes, no } => vec![("yes", yes), ("no", no)],
            Forms::Named(template) => vec![("named", template)],
        };
        for (variant, template) in templates {
            let name = format!("{}.{}", narrative.name(), variant);
            if let Err(err) = engine.register_template_string(&name, template) {
                warn!(template = %name, error = %err, "failed to register narrative template");
            }
        }
    }
    engine
});

/// Renders the sentence for `value`, or `None` when the answer is empty or unrecognised.
pub fn narrate(narrative: Narrative, value: &str) -> Option<String> {
    let value = value.trim();
    let variant = match narrative.forms() {
        Forms::YesNo { .. } => match value {
            "Yes" => "yes",
            "No" => "no",
            _ => return None,
        },
        Forms::Named(_) if value.is_empty() || value == NOT_AVAILABLE => return None,
        Forms::Named(_) => "named",
    };
    let name = format!("{}.{}", narrative.name(), variant);
    render(&name, &json!({ "subject": SUBJECT, "value": value }))
}

/// Renders caller-supplied copy (for example branding text) with the same engine.
pub fn render_copy(template: &str, data: &Value) -> Option<String> {
    match ENGINE.render_template(template, data) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "failed to render copy template");
            None
        }
    }
}

fn render(name: &str, data: &Value) -> Option<String> {
    match ENGINE.render(name, data) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(err) => {
            warn!(template = %name, error = %err, "failed to render narrative");
            None
        }
    }
}

/// Joins the sentences that rendered into one paragraph.
pub fn paragraph<I>(sentences: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let sentences: Vec<String> = sentences.into_iter().flatten().collect();
    if sentences.is_empty() {
        None
    } else {
        Some(sentences.join(" "))
    }
}
