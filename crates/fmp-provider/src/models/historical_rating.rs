use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::field_map::{FieldReader, FieldSpec};
use super::types::RawRecord;
use crate::errors::FmpError;

/// Field declarations for [`HistoricalRatingData`], keyed by snake_case name.
pub mod fields {
    use super::FieldSpec;

    pub const SYMBOL: FieldSpec = FieldSpec::aliased("symbol", &["ticker"]);
    pub const DATE: FieldSpec = FieldSpec::new("date");
    pub const RATING: FieldSpec = FieldSpec::new("rating");
    pub const RATING_SCORE: FieldSpec = FieldSpec::new("rating_score");
    pub const RATING_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_recommendation");
    pub const DCF_SCORE: FieldSpec = FieldSpec::new("rating_details_dcf_score");
    pub const DCF_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_details_dcf_recommendation");
    pub const ROE_SCORE: FieldSpec = FieldSpec::new("rating_details_roe_score");
    pub const ROE_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_details_roe_recommendation");
    pub const ROA_SCORE: FieldSpec = FieldSpec::new("rating_details_roa_score");
    pub const ROA_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_details_roa_recommendation");
    pub const DE_SCORE: FieldSpec = FieldSpec::new("rating_details_de_score");
    pub const DE_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_details_de_recommendation");
    pub const PE_SCORE: FieldSpec = FieldSpec::new("rating_details_pe_score");
    pub const PE_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_details_pe_recommendation");
    pub const PB_SCORE: FieldSpec = FieldSpec::new("rating_details_pb_score");
    pub const PB_RECOMMENDATION: FieldSpec = FieldSpec::new("rating_details_pb_recommendation");

    /// Every field of the record, in output order.
    pub const ALL: &[FieldSpec] = &[
        SYMBOL,
        DATE,
        RATING,
        RATING_SCORE,
        RATING_RECOMMENDATION,
        DCF_SCORE,
        DCF_RECOMMENDATION,
        ROE_SCORE,
        ROE_RECOMMENDATION,
        ROA_SCORE,
        ROA_RECOMMENDATION,
        DE_SCORE,
        DE_RECOMMENDATION,
        PE_SCORE,
        PE_RECOMMENDATION,
        PB_SCORE,
        PB_RECOMMENDATION,
    ];
}

/// Analyst rating for one symbol on one date.
///
/// Scores run from 1 (worst) to 5 (best); recommendations are FMP's
/// "Strong Buy" .. "Strong Sell" labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRatingData {
    /// Ticker (raw key `symbol` or `ticker`)
    pub symbol: String,

    /// Rating date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Letter rating, e.g. "S+", "A-", "B+"
    pub rating: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_recommendation: Option<String>,

    /// Discounted cash flow component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_dcf_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_dcf_recommendation: Option<String>,

    /// Return on equity component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_roe_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_roe_recommendation: Option<String>,

    /// Return on assets component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_roa_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_roa_recommendation: Option<String>,

    /// Debt to equity component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_de_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_de_recommendation: Option<String>,

    /// Price to earnings component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_pe_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_pe_recommendation: Option<String>,

    /// Price to book component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_pb_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_details_pb_recommendation: Option<String>,
}

impl HistoricalRatingData {
    /// Create a record with only the required fields set.
    pub fn new(symbol: impl Into<String>, rating: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            date: None,
            rating: rating.into(),
            rating_score: None,
            rating_recommendation: None,
            rating_details_dcf_score: None,
            rating_details_dcf_recommendation: None,
            rating_details_roe_score: None,
            rating_details_roe_recommendation: None,
            rating_details_roa_score: None,
            rating_details_roa_recommendation: None,
            rating_details_de_score: None,
            rating_details_de_recommendation: None,
            rating_details_pe_score: None,
            rating_details_pe_recommendation: None,
            rating_details_pb_score: None,
            rating_details_pb_recommendation: None,
        }
    }

    /// Map a normalized raw record onto the typed schema.
    ///
    /// `index` is the record's position in its batch and only feeds error
    /// messages.
    pub fn from_raw(record: &RawRecord, index: usize) -> Result<Self, FmpError> {
        let r = FieldReader::new(record, index);

        Ok(Self {
            symbol: r.required_string(&fields::SYMBOL)?,
            date: r.optional_date(&fields::DATE)?,
            rating: r.required_string(&fields::RATING)?,
            rating_score: r.optional_i64(&fields::RATING_SCORE)?,
            rating_recommendation: r.optional_string(&fields::RATING_RECOMMENDATION)?,
            rating_details_dcf_score: r.optional_i64(&fields::DCF_SCORE)?,
            rating_details_dcf_recommendation: r.optional_string(&fields::DCF_RECOMMENDATION)?,
            rating_details_roe_score: r.optional_i64(&fields::ROE_SCORE)?,
            rating_details_roe_recommendation: r.optional_string(&fields::ROE_RECOMMENDATION)?,
            rating_details_roa_score: r.optional_i64(&fields::ROA_SCORE)?,
            rating_details_roa_recommendation: r.optional_string(&fields::ROA_RECOMMENDATION)?,
            rating_details_de_score: r.optional_i64(&fields::DE_SCORE)?,
            rating_details_de_recommendation: r.optional_string(&fields::DE_RECOMMENDATION)?,
            rating_details_pe_score: r.optional_i64(&fields::PE_SCORE)?,
            rating_details_pe_recommendation: r.optional_string(&fields::PE_RECOMMENDATION)?,
            rating_details_pb_score: r.optional_i64(&fields::PB_SCORE)?,
            rating_details_pb_recommendation: r.optional_string(&fields::PB_RECOMMENDATION)?,
        })
    }
}
