use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecordError;
use crate::spec::field::FieldKey;

/// DTC share of sales, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Retail share; derived for display, never stored.
    pub fn complement(self) -> u8 {
        100 - self.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self(50)
    }
}

impl From<u32> for Percent {
    fn from(value: u32) -> Self {
        Percent::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

/// Value written into a single field through [`AnswerRecord::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choices(Vec<String>),
    Percent(u32),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Choices(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Percent(value)
    }
}

/// Borrowed view of a stored answer, used by the document formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Number(u8),
}

impl AnswerValue<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            AnswerValue::Number(_) => false,
        }
    }
}

/// The single answer record shared by every step of the wizard.
///
/// Every field has a default, so an incomplete record can always be handed to the composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerRecord {
    pub company_name: String,
    pub returns_per_year: String,
    pub seasonality: String,
    pub sells_into_retailers: String,
    pub retailer_program: String,
    pub current_returns_handling: String,
    pub returns_handling: String,
    pub countries: String,
    pub warranty_program: String,
    pub warranty_interest: String,
    pub subscription_program: String,
    pub subscription_interest: String,
    #[schemars(with = "u8")]
    pub sales_split_dtc: Percent,
    pub interested_channels: Vec<String>,
    pub channel_restrictions: String,
    pub branded_dtc: String,
    pub branded_management: String,
    pub trade_in: String,
    pub value_priority: String,
    pub opportunity_feeling: String,
    pub excess_inventory_channel: String,
    pub excess_inventory_national: String,
    pub excess_inventory_regional: String,
    pub excess_inventory: String,
    pub combine_strategy: String,
    pub name: String,
    pub email: String,
}

impl Default for AnswerRecord {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            returns_per_year: String::new(),
            seasonality: "Mostly flat".to_string(),
            sells_into_retailers: String::new(),
            retailer_program: String::new(),
            current_returns_handling: String::new(),
            returns_handling: String::new(),
            countries: String::new(),
            warranty_program: String::new(),
            warranty_interest: String::new(),
            subscription_program: String::new(),
            subscription_interest: String::new(),
            sales_split_dtc: Percent::default(),
            interested_channels: Vec::new(),
            channel_restrictions: String::new(),
            branded_dtc: String::new(),
            branded_management: String::new(),
            trade_in: String::new(),
            value_priority: String::new(),
            opportunity_feeling: String::new(),
            excess_inventory_channel: String::new(),
            excess_inventory_national: String::new(),
            excess_inventory_regional: String::new(),
            excess_inventory: String::new(),
            combine_strategy: String::new(),
            name: String::new(),
            email: String::new(),
        }
    }
}

impl AnswerRecord {
    pub fn from_json_str(raw: &str) -> Result<Self, RecordError> {
        serde_json::from_str(raw).map_err(|source| RecordError::Parse {
            what: "answers",
            source,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        serde_json::to_string_pretty(self).map_err(RecordError::Encode)
    }

    /// JSON Schema describing the answer record.
    pub fn schema() -> Result<Value, RecordError> {
        serde_json::to_value(schemars::schema_for!(AnswerRecord)).map_err(RecordError::Encode)
    }

    /// Text content of a string-typed field; `None` for the list and percentage fields.
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.text_slot(key).map(String::as_str)
    }

    fn text_slot(&self, key: FieldKey) -> Option<&String> {
        let slot = match key {
            FieldKey::CompanyName => &self.company_name,
            FieldKey::ReturnsPerYear => &self.returns_per_year,
            FieldKey::Seasonality => &self.seasonality,
            FieldKey::SellsIntoRetailers => &self.sells_into_retailers,
            FieldKey::RetailerProgram => &self.retailer_program,
            FieldKey::CurrentReturnsHandling => &self.current_returns_handling,
            FieldKey::ReturnsHandling => &self.returns_handling,
            FieldKey::Countries => &self.countries,
            FieldKey::WarrantyProgram => &self.warranty_program,
            FieldKey::WarrantyInterest => &self.warranty_interest,
            FieldKey::SubscriptionProgram => &self.subscription_program,
            FieldKey::SubscriptionInterest => &self.subscription_interest,
            FieldKey::ChannelRestrictions => &self.channel_restrictions,
            FieldKey::BrandedDtc => &self.branded_dtc,
            FieldKey::BrandedManagement => &self.branded_management,
            FieldKey::TradeIn => &self.trade_in,
            FieldKey::ValuePriority => &self.value_priority,
            FieldKey::OpportunityFeeling => &self.opportunity_feeling,
            FieldKey::ExcessInventoryChannel => &self.excess_inventory_channel,
            FieldKey::ExcessInventoryNational => &self.excess_inventory_national,
            FieldKey::ExcessInventoryRegional => &self.excess_inventory_regional,
            FieldKey::ExcessInventory => &self.excess_inventory,
            FieldKey::CombineStrategy => &self.combine_strategy,
            FieldKey::Name => &self.name,
            FieldKey::Email => &self.email,
            FieldKey::SalesSplitDtc | FieldKey::InterestedChannels => return None,
        };
        Some(slot)
    }

    fn text_slot_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        let slot = match key {
            FieldKey::CompanyName => &mut self.company_name,
            FieldKey::ReturnsPerYear => &mut self.returns_per_year,
            FieldKey::Seasonality => &mut self.seasonality,
            FieldKey::SellsIntoRetailers => &mut self.sells_into_retailers,
            FieldKey::RetailerProgram => &mut self.retailer_program,
            FieldKey::CurrentReturnsHandling => &mut self.current_returns_handling,
            FieldKey::ReturnsHandling => &mut self.returns_handling,
            FieldKey::Countries => &mut self.countries,
            FieldKey::WarrantyProgram => &mut self.warranty_program,
            FieldKey::WarrantyInterest => &mut self.warranty_interest,
            FieldKey::SubscriptionProgram => &mut self.subscription_program,
            FieldKey::SubscriptionInterest => &mut self.subscription_interest,
            FieldKey::ChannelRestrictions => &mut self.channel_restrictions,
            FieldKey::BrandedDtc => &mut self.branded_dtc,
            FieldKey::BrandedManagement => &mut self.branded_management,
            FieldKey::TradeIn => &mut self.trade_in,
            FieldKey::ValuePriority => &mut self.value_priority,
            FieldKey::OpportunityFeeling => &mut self.opportunity_feeling,
            FieldKey::ExcessInventoryChannel => &mut self.excess_inventory_channel,
            FieldKey::ExcessInventoryNational => &mut self.excess_inventory_national,
            FieldKey::ExcessInventoryRegional => &mut self.excess_inventory_regional,
            FieldKey::ExcessInventory => &mut self.excess_inventory,
            FieldKey::CombineStrategy => &mut self.combine_strategy,
            FieldKey::Name => &mut self.name,
            FieldKey::Email => &mut self.email,
            FieldKey::SalesSplitDtc | FieldKey::InterestedChannels => return None,
        };
        Some(slot)
    }

    /// Borrowed view of any field.
    pub fn answer(&self, key: FieldKey) -> AnswerValue<'_> {
        match key {
            FieldKey::SalesSplitDtc => AnswerValue::Number(self.sales_split_dtc.get()),
            FieldKey::InterestedChannels => AnswerValue::List(&self.interested_channels),
            other => AnswerValue::Text(self.text(other).unwrap_or_default()),
        }
    }

    /// True when the field holds a non-blank answer. The percentage is always filled.
    pub fn is_filled(&self, key: FieldKey) -> bool {
        !self.answer(key).is_empty()
    }

    /// Writes one field. Returns `false` (and leaves the record untouched) when the value
    /// kind does not fit the field.
    pub fn set(&mut self, key: FieldKey, value: FieldValue) -> bool {
        match (key, value) {
            (FieldKey::SalesSplitDtc, FieldValue::Percent(percent)) => {
                self.sales_split_dtc = Percent::new(percent);
                true
            }
            (FieldKey::SalesSplitDtc, FieldValue::Text(text)) => match text.trim().parse::<u32>()
            {
                Ok(percent) => {
                    self.sales_split_dtc = Percent::new(percent);
                    true
                }
                Err(_) => false,
            },
            (FieldKey::InterestedChannels, FieldValue::Choices(choices)) => {
                self.interested_channels = Vec::new();
                for choice in choices {
                    if !self.interested_channels.contains(&choice) {
                        self.interested_channels.push(choice);
                    }
                }
                true
            }
            (key, FieldValue::Text(text)) => match self.text_slot_mut(key) {
                Some(slot) => {
                    *slot = text;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Symmetric toggle on the channel set; newly added options are appended.
    pub fn toggle_channel(&mut self, option: &str) {
        if let Some(position) = self
            .interested_channels
            .iter()
            .position(|channel| channel == option)
        {
            self.interested_channels.remove(position);
        } else {
            self.interested_channels.push(option.to_string());
        }
    }
}
