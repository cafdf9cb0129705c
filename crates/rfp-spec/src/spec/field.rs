use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::spec::step::StepId;

/// Identifier of one answer in the closed field set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    CompanyName,
    ReturnsPerYear,
    Seasonality,
    SellsIntoRetailers,
    RetailerProgram,
    CurrentReturnsHandling,
    ReturnsHandling,
    Countries,
    WarrantyProgram,
    WarrantyInterest,
    SubscriptionProgram,
    SubscriptionInterest,
    SalesSplitDtc,
    InterestedChannels,
    ChannelRestrictions,
    BrandedDtc,
    BrandedManagement,
    TradeIn,
    ValuePriority,
    OpportunityFeeling,
    ExcessInventoryChannel,
    ExcessInventoryNational,
    ExcessInventoryRegional,
    ExcessInventory,
    CombineStrategy,
    Name,
    Email,
}

impl FieldKey {
    pub const ALL: [FieldKey; 27] = [
        FieldKey::CompanyName,
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
        FieldKey::SalesSplitDtc,
        FieldKey::InterestedChannels,
        FieldKey::ChannelRestrictions,
        FieldKey::BrandedDtc,
        FieldKey::BrandedManagement,
        FieldKey::TradeIn,
        FieldKey::ValuePriority,
        FieldKey::OpportunityFeeling,
        FieldKey::ExcessInventoryChannel,
        FieldKey::ExcessInventoryNational,
        FieldKey::ExcessInventoryRegional,
        FieldKey::ExcessInventory,
        FieldKey::CombineStrategy,
        FieldKey::Name,
        FieldKey::Email,
    ];

    /// Wire name, matching the serde representation of the answer record.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::CompanyName => "companyName",
            FieldKey::ReturnsPerYear => "returnsPerYear",
            FieldKey::Seasonality => "seasonality",
            FieldKey::SellsIntoRetailers => "sellsIntoRetailers",
            FieldKey::RetailerProgram => "retailerProgram",
            FieldKey::CurrentReturnsHandling => "currentReturnsHandling",
            FieldKey::ReturnsHandling => "returnsHandling",
            FieldKey::Countries => "countries",
            FieldKey::WarrantyProgram => "warrantyProgram",
            FieldKey::WarrantyInterest => "warrantyInterest",
            FieldKey::SubscriptionProgram => "subscriptionProgram",
            FieldKey::SubscriptionInterest => "subscriptionInterest",
            FieldKey::SalesSplitDtc => "salesSplitDtc",
            FieldKey::InterestedChannels => "interestedChannels",
            FieldKey::ChannelRestrictions => "channelRestrictions",
            FieldKey::BrandedDtc => "brandedDtc",
            FieldKey::BrandedManagement => "brandedManagement",
            FieldKey::TradeIn => "tradeIn",
            FieldKey::ValuePriority => "valuePriority",
            FieldKey::OpportunityFeeling => "opportunityFeeling",
            FieldKey::ExcessInventoryChannel => "excessInventoryChannel",
            FieldKey::ExcessInventoryNational => "excessInventoryNational",
            FieldKey::ExcessInventoryRegional => "excessInventoryRegional",
            FieldKey::ExcessInventory => "excessInventory",
            FieldKey::CombineStrategy => "combineStrategy",
            FieldKey::Name => "name",
            FieldKey::Email => "email",
        }
    }

    pub fn spec(&self) -> &'static FieldSpec {
        field_spec(*self)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = RecordError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| RecordError::UnknownField(raw.to_string()))
    }
}

pub const YES_NO: &[&str] = &["Yes", "No"];

pub const SEASONALITY_OPTIONS: &[&str] =
    &["Mostly flat", "Q1 Peak", "Q2 Peak", "Q3 Peak", "Q4 Peak"];

pub const RETAILER_PROGRAM_OPTIONS: &[&str] = &["DIF", "ZVR", "RTV"];

pub const CHANNEL_OPTIONS: &[&str] = &[
    "Amazon",
    "Big Off-Price Retailers",
    "Regional Off-Price Retailers",
    "Other",
];

pub const MANAGEMENT_OPTIONS: &[&str] = &["In-house", "Out-source"];

pub const VALUE_OPTIONS: &[&str] = &[
    "Customer loyalty",
    "Subsidizing cost / driving revenue",
    "Environmental factors",
    "Testing new markets",
];

pub const EXCESS_NATIONAL: &str = "Off-Priced Retailers (National)";
pub const EXCESS_REGIONAL: &str = "Off-Priced Retailers (Regional)";

pub const EXCESS_CHANNEL_OPTIONS: &[&str] = &[EXCESS_NATIONAL, EXCESS_REGIONAL];

/// Retailer program codes with their expansion and the help text shown at intake.
pub const PROGRAM_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        "DIF",
        "Destroy in Field",
        "The retailer destroys the product on-site instead of shipping it back, usually for a financial credit.",
    ),
    (
        "ZVR",
        "Zero Value Return",
        "Items are returned to the retailer but deemed to have no recovery value; they are typically recycled or disposed of by the retailer.",
    ),
    (
        "RTV",
        "Return to Vendor",
        "Items are shipped back to the brand's facility or 3PL for grading and potential recovery.",
    ),
];

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    LongText,
    /// One of a fixed option set.
    Choice(&'static [&'static str]),
    /// Any subset of a fixed option set.
    MultiChoice(&'static [&'static str]),
    /// Integer percentage in `0..=100`.
    Percent,
}

impl FieldKind {
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Choice(options) | FieldKind::MultiChoice(options) => options,
            _ => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::LongText => "long_text",
            FieldKind::Choice(_) => "choice",
            FieldKind::MultiChoice(_) => "multi_choice",
            FieldKind::Percent => "percent",
        }
    }
}

/// Static description of a field: where it is asked, how it is labelled, how it renders.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub step: Option<StepId>,
    /// Question shown during intake.
    pub prompt: &'static str,
    /// Short label used for the document row.
    pub label: &'static str,
    pub helper: Option<&'static str>,
    pub kind: FieldKind,
    pub expand_acronyms: bool,
    pub display_suffix: Option<&'static str>,
}

impl FieldSpec {
    const fn new(
        key: FieldKey,
        step: Option<StepId>,
        prompt: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            step,
            prompt,
            label,
            helper: None,
            kind,
            expand_acronyms: false,
            display_suffix: None,
        }
    }

    const fn helper(mut self, helper: &'static str) -> Self {
        self.helper = Some(helper);
        self
    }

    const fn acronyms(mut self) -> Self {
        self.expand_acronyms = true;
        self
    }

    const fn suffix(mut self, suffix: &'static str) -> Self {
        self.display_suffix = Some(suffix);
        self
    }

    /// Whether a document row for this field should not be split across pages.
    pub fn keep_together(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::LongText)
    }
}

use FieldKey as K;
use StepId::{General, Lead, Recommerce, Value};

static FIELDS: [FieldSpec; 27] = [
    FieldSpec::new(
        K::CompanyName,
        Some(Lead),
        "Company name",
        "Company name",
        FieldKind::Text,
    ),
    FieldSpec::new(
        K::ReturnsPerYear,
        Some(General),
        "How many returns do you get per year?",
        "Annual return volume",
        FieldKind::Text,
    )
    .helper("Approximate annualized return count."),
    FieldSpec::new(
        K::Seasonality,
        Some(General),
        "How seasonal are your returns?",
        "Seasonality",
        FieldKind::Choice(SEASONALITY_OPTIONS),
    ),
    FieldSpec::new(
        K::SellsIntoRetailers,
        Some(General),
        "Do you sell into retailers?",
        "Sells into retailers",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::RetailerProgram,
        Some(General),
        "If Yes, what program do you run?",
        "Retailer program",
        FieldKind::Choice(RETAILER_PROGRAM_OPTIONS),
    )
    .helper("DIF = Destroy in Field | ZVR = Zero Value Return | RTV = Return to Vendor")
    .acronyms(),
    FieldSpec::new(
        K::CurrentReturnsHandling,
        Some(General),
        "For returns that are sent back to you (e.g., DTC or RTV), what is your current process for handling them?",
        "Current returns process",
        FieldKind::LongText,
    )
    .acronyms(),
    FieldSpec::new(
        K::ReturnsHandling,
        Some(General),
        "If you're receiving your returns back, what do you do with them?",
        "Returns handling",
        FieldKind::LongText,
    )
    .acronyms(),
    FieldSpec::new(
        K::Countries,
        Some(General),
        "What countries are you currently selling in?",
        "Countries",
        FieldKind::Text,
    )
    .helper("e.g., US, Canada, UK, EU"),
    FieldSpec::new(
        K::WarrantyProgram,
        Some(General),
        "Do you currently operate a warranty program?",
        "Warranty program",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::WarrantyInterest,
        Some(General),
        "If No: Would you be interested in a warranty program?",
        "Warranty program interest",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::SubscriptionProgram,
        Some(General),
        "Do you currently run a subscription program?",
        "Subscription program",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::SubscriptionInterest,
        Some(General),
        "If No: Would you be interested in a subscription program?",
        "Subscription program interest",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::SalesSplitDtc,
        Some(Recommerce),
        "What % of sales are DTC vs. retail?",
        "Sales split",
        FieldKind::Percent,
    )
    .helper("Percentage of sales that are direct-to-consumer; the rest is retail.")
    .suffix("% DTC"),
    FieldSpec::new(
        K::InterestedChannels,
        Some(Recommerce),
        "What channels would you be interested in selling on?",
        "Interested recommerce channels",
        FieldKind::MultiChoice(CHANNEL_OPTIONS),
    )
    .acronyms(),
    FieldSpec::new(
        K::ChannelRestrictions,
        Some(Recommerce),
        "Do you have any channel restrictions?",
        "Channel restrictions",
        FieldKind::LongText,
    )
    .acronyms(),
    FieldSpec::new(
        K::BrandedDtc,
        Some(Recommerce),
        "Would you be interested in a branded second-hand DTC program?",
        "Branded second-hand DTC",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::BrandedManagement,
        Some(Recommerce),
        "If Yes: Would you want to manage it in-house or out-source it?",
        "Management approach",
        FieldKind::Choice(MANAGEMENT_OPTIONS),
    ),
    FieldSpec::new(
        K::TradeIn,
        Some(Recommerce),
        "Would you be interested in a Trade-In program?",
        "Trade-In program",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::ValuePriority,
        Some(Value),
        "What do you value most in returns?",
        "Value priority",
        FieldKind::Choice(VALUE_OPTIONS),
    ),
    FieldSpec::new(
        K::OpportunityFeeling,
        Some(Value),
        "Do you currently feel like you take advantage of the opportunity with returns?",
        "Capturing opportunity today",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(
        K::ExcessInventoryChannel,
        Some(Value),
        "Where do you currently sell your excess inventory?",
        "Excess inventory channel",
        FieldKind::Choice(EXCESS_CHANNEL_OPTIONS),
    ),
    FieldSpec::new(
        K::ExcessInventoryNational,
        Some(Value),
        "Which ones? (e.g., TJX, Ross, etc.)",
        "National retailers",
        FieldKind::Text,
    ),
    FieldSpec::new(
        K::ExcessInventoryRegional,
        Some(Value),
        "Which ones? (e.g., Ollie's, Gabe's, etc.)",
        "Regional retailers",
        FieldKind::Text,
    ),
    FieldSpec::new(
        K::ExcessInventory,
        None,
        "Where do you currently sell your excess inventory?",
        "Excess inventory",
        FieldKind::LongText,
    ),
    FieldSpec::new(
        K::CombineStrategy,
        Some(Value),
        "Would you be interested in combining your excess inventory strategy with returns to create a broad recommerce strategy?",
        "Combined recommerce strategy",
        FieldKind::Choice(YES_NO),
    ),
    FieldSpec::new(K::Name, Some(Lead), "Full name", "Contact name", FieldKind::Text),
    FieldSpec::new(K::Email, Some(Lead), "Email", "Contact email", FieldKind::Text),
];

/// Looks up the static descriptor for `key`.
pub fn field_spec(key: FieldKey) -> &'static FieldSpec {
    // FIELDS is declared in FieldKey::ALL order.
    let index = FieldKey::ALL
        .iter()
        .position(|candidate| *candidate == key)
        .unwrap_or_default();
    &FIELDS[index]
}

/// Regroups a whole-number count typed with or without separators.
///
/// Returns `None` when `raw` holds anything besides digits, commas and spaces, so callers
/// can reject the input instead of silently dropping characters.
pub fn group_thousands(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    Some(group_digits(if significant.is_empty() { "0" } else { significant }))
}

pub(crate) fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_table_follows_key_order() {
        for key in FieldKey::ALL {
            assert_eq!(field_spec(key).key, key);
        }
    }

    #[test]
    fn keys_round_trip_through_wire_names() {
        for key in FieldKey::ALL {
            assert_eq!(key.as_str().parse::<FieldKey>().unwrap(), key);
        }
        assert!("unknownField".parse::<FieldKey>().is_err());
    }

    #[test]
    fn group_thousands_regroups_counts() {
        assert_eq!(group_thousands("150000").as_deref(), Some("150,000"));
        assert_eq!(group_thousands("1,2345").as_deref(), Some("12,345"));
        assert_eq!(group_thousands(" 999 ").as_deref(), Some("999"));
        assert_eq!(group_thousands("007").as_deref(), Some("7"));
    }

    #[test]
    fn group_thousands_rejects_anything_but_digits() {
        assert_eq!(group_thousands("roughly 20k"), None);
        assert_eq!(group_thousands("about 1200000 units"), None);
        assert_eq!(group_thousands("lots"), None);
        assert_eq!(group_thousands(""), None);
        assert_eq!(group_thousands("-5"), None);
    }
}
