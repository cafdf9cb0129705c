use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::FieldKey;

/// Wizard step identifiers, in presentation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    General,
    Recommerce,
    Value,
    Lead,
}

impl StepId {
    pub const ALL: [StepId; 4] = [
        StepId::General,
        StepId::Recommerce,
        StepId::Value,
        StepId::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::General => "general",
            StepId::Recommerce => "recommerce",
            StepId::Value => "value",
            StepId::Lead => "lead",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StepId::General => 0,
            StepId::Recommerce => 1,
            StepId::Value => 2,
            StepId::Lead => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<StepId> {
        StepId::ALL.get(index).copied()
    }

    /// The lead-capture step; it never blocks advancing.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepId::Lead)
    }

    pub fn spec(&self) -> &'static StepSpec {
        &STEPS[self.index()]
    }
}

/// Immutable step descriptor. Steps reference fields; they never own answers.
#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub id: StepId,
    pub title: &'static str,
    pub blurb: &'static str,
    /// Every field prompted on this step, in prompt order (conditional ones included).
    pub fields: &'static [FieldKey],
    /// Fields that must be filled regardless of other answers.
    pub required: &'static [FieldKey],
}

pub const STEP_COUNT: usize = 4;

pub static STEPS: [StepSpec; STEP_COUNT] = [
    StepSpec {
        id: StepId::General,
        title: "General Logistics",
        blurb: "Baseline reverse logistics context: volume, seasonality, retail presence, and programs in place.",
        fields: &[
            FieldKey::ReturnsPerYear,
            FieldKey::Seasonality,
            FieldKey::SellsIntoRetailers,
            FieldKey::RetailerProgram,
            FieldKey::CurrentReturnsHandling,
            FieldKey::ReturnsHandling,
            FieldKey::Countries,
            FieldKey::WarrantyProgram,
            FieldKey::WarrantyInterest,
            FieldKey::SubscriptionProgram,
            FieldKey::SubscriptionInterest,
        ],
        required: &[
            FieldKey::ReturnsPerYear,
            FieldKey::Seasonality,
            FieldKey::SellsIntoRetailers,
            FieldKey::ReturnsHandling,
            FieldKey::Countries,
            FieldKey::WarrantyProgram,
            FieldKey::SubscriptionProgram,
        ],
    },
    StepSpec {
        id: StepId::Recommerce,
        title: "Recommerce Strategy",
        blurb: "Channel appetite, owned vs. outsourced approaches, and program interest.",
        fields: &[
            FieldKey::SalesSplitDtc,
            FieldKey::InterestedChannels,
            FieldKey::ChannelRestrictions,
            FieldKey::BrandedDtc,
            FieldKey::BrandedManagement,
            FieldKey::TradeIn,
        ],
        required: &[
            FieldKey::SalesSplitDtc,
            FieldKey::BrandedDtc,
            FieldKey::TradeIn,
        ],
    },
    StepSpec {
        id: StepId::Value,
        title: "Value & Opportunity",
        blurb: "What success looks like, current coverage of the opportunity, and constraints.",
        fields: &[
            FieldKey::ValuePriority,
            FieldKey::OpportunityFeeling,
            FieldKey::ExcessInventoryChannel,
            FieldKey::ExcessInventoryNational,
            FieldKey::ExcessInventoryRegional,
            FieldKey::CombineStrategy,
        ],
        required: &[
            FieldKey::ValuePriority,
            FieldKey::OpportunityFeeling,
            FieldKey::ExcessInventoryChannel,
            FieldKey::CombineStrategy,
        ],
    },
    StepSpec {
        id: StepId::Lead,
        title: "Lead Capture & Export",
        blurb: "Share contact details and generate an RFP tailored to your operation.",
        fields: &[FieldKey::Name, FieldKey::Email, FieldKey::CompanyName],
        required: &[],
    },
];
