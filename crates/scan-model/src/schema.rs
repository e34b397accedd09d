//! The static column registry for the screener feed.
//!
//! The feed schema is fixed: every ingested row carries exactly these columns
//! in this order, regardless of which columns the source file actually
//! contains. Columns absent from the source coerce to their type's default.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Well-known column names referenced across the workspace.
pub mod col {
    pub const MASTER_RANK: &str = "master_rank";
    pub const SYMBOL: &str = "symbol";
    pub const NAME: &str = "name";
    pub const SECTOR: &str = "sector";
    pub const SESSION: &str = "session";
    pub const PRESETS_LIST: &str = "presets_list";
    pub const BEST_PRESET: &str = "best_preset";
    pub const COMPOSITE_SCORE: &str = "composite_score";
    pub const ML_FINAL_SCORE: &str = "ml_final_score";
    pub const ML_ARCHETYPE: &str = "ml_archetype";
    pub const ML_CONFIDENCE: &str = "ml_confidence";
    pub const PX_EFF: &str = "px_eff";
    pub const CHG_EFF: &str = "chg_eff";
    pub const VOL_EFF: &str = "vol_eff";
    pub const PRICE: &str = "price";
    pub const CHANGE_PCT: &str = "change_pct";
    pub const VOLUME: &str = "volume";
    pub const GAP_PCT: &str = "gap_pct";
    pub const HOD_DISTANCE: &str = "hod_distance";
    pub const REL_VOLUME: &str = "rel_volume";
    pub const TURNOVER_RATE: &str = "turnover_rate";
    pub const VWAP: &str = "vwap";
    pub const SPREAD_PCT: &str = "spread_pct";
    pub const FLAG_HOD: &str = "flag_hod";
    pub const FLAG_PM_ACTIVE: &str = "flag_pm_active";
    pub const FLAG_HAS_EARNINGS: &str = "flag_has_earnings";
    pub const FLAG_BROKEN_QUOTE: &str = "flag_broken_quote";
    pub const FLAG_NO_DOLLAR_VOL: &str = "flag_no_dollar_vol";
}

/// Archetype value matched by the "explosive" quick filter.
pub const EXPLOSIVE_ARCHETYPE: &str = "EXPLOSIVE";

/// Semantic type of a column, fixed at registry definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Floating-point value; `integer` marks count-like columns (ranks,
    /// volumes, sizes) that coerce to whole numbers.
    Numeric { integer: bool },
    Boolean,
    Text,
}

/// One declared feed column: name, semantic type, ordinal position.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub ordinal: usize,
}

const FLOAT: ColumnKind = ColumnKind::Numeric { integer: false };
const COUNT: ColumnKind = ColumnKind::Numeric { integer: true };
const BOOL: ColumnKind = ColumnKind::Boolean;
const TEXT: ColumnKind = ColumnKind::Text;

/// The full declared column list, in feed order.
const DECLARED: &[(&str, ColumnKind)] = &[
    ("master_rank", COUNT),
    ("symbol", TEXT),
    ("name", TEXT),
    ("exchange", TEXT),
    ("sector", TEXT),
    ("industry", TEXT),
    ("session", TEXT),
    ("presets_passed", COUNT),
    ("presets_list", TEXT),
    ("best_preset", TEXT),
    ("best_score", FLOAT),
    ("composite_score", FLOAT),
    ("ml_final_score", FLOAT),
    ("ml_archetype", TEXT),
    ("ml_confidence", TEXT),
    ("ml_feature_coverage", FLOAT),
    ("px_eff", FLOAT),
    ("chg_eff", FLOAT),
    ("vol_eff", COUNT),
    ("price", FLOAT),
    ("change_pct", FLOAT),
    ("open", FLOAT),
    ("high", FLOAT),
    ("low", FLOAT),
    ("prev_close", FLOAT),
    ("gap_pct", FLOAT),
    ("gap_holding", BOOL),
    ("hod_distance", FLOAT),
    ("volume", COUNT),
    ("rel_volume", FLOAT),
    ("avg_vol", COUNT),
    ("avg_vol_10d", COUNT),
    ("avg_vol_3m", COUNT),
    ("turnover_rate", FLOAT),
    ("mkt_cap", FLOAT),
    ("shares_outstanding", FLOAT),
    ("total_shares", FLOAT),
    ("week52_position", FLOAT),
    ("week52_high", FLOAT),
    ("week52_low", FLOAT),
    ("vwap", FLOAT),
    ("bid_price", FLOAT),
    ("bid_size", COUNT),
    ("ask_price", FLOAT),
    ("ask_size", COUNT),
    ("spread_pct", FLOAT),
    ("pm_price", FLOAT),
    ("pm_change_amt", FLOAT),
    ("pch_ratio", FLOAT),
    ("flag_pm_active", BOOL),
    ("after_hours_price", FLOAT),
    ("after_hours_chg", FLOAT),
    ("after_hours_pct", FLOAT),
    ("after_hours_vol", COUNT),
    ("after_hours_high", FLOAT),
    ("after_hours_low", FLOAT),
    ("flag_hod", BOOL),
    ("flag_thin_supply", BOOL),
    ("flag_rvol5x", BOOL),
    ("flag_big_move", BOOL),
    ("flag_gap_up", BOOL),
    ("flag_wide_range", BOOL),
    ("flag_illiquid", BOOL),
    ("flag_broken_quote", BOOL),
    ("flag_no_dollar_vol", BOOL),
    ("flag_has_earnings", BOOL),
    ("flag_low_ah_liquidity", BOOL),
    ("flag_session_reversal", BOOL),
    ("flag_session_exhaustion", BOOL),
    ("earnings_date", TEXT),
    ("dividend_date", TEXT),
    ("lnk_Yahoo", TEXT),
    ("lnk_StockTwits", TEXT),
    ("lnk_Finviz", TEXT),
    ("lnk_Webull", TEXT),
    ("lnk_SEC_8K", TEXT),
    ("lnk_Google_News", TEXT),
    ("lnk_Google_Finance", TEXT),
];

/// The shared column registry: ordered columns plus a name-to-ordinal index.
#[derive(Debug)]
pub struct Schema {
    columns: Vec<Column>,
    index: BTreeMap<&'static str, usize>,
}

impl Schema {
    fn build() -> Self {
        let columns: Vec<Column> = DECLARED
            .iter()
            .enumerate()
            .map(|(ordinal, &(name, kind))| Column {
                name,
                kind,
                ordinal,
            })
            .collect();
        let index = columns.iter().map(|c| (c.name, c.ordinal)).collect();
        Self { columns, index }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Looks up a declared column by name. Returns `None` for names outside
    /// the registry; callers never probe rows with undeclared names.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Sorted names of numeric columns, as reported in the data payload.
    pub fn numeric_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .columns
            .iter()
            .filter(|c| matches!(c.kind, ColumnKind::Numeric { .. }))
            .map(|c| c.name.to_owned())
            .collect();
        names.sort();
        names
    }

    /// Sorted names of boolean columns, as reported in the data payload.
    pub fn boolish_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Boolean)
            .map(|c| c.name.to_owned())
            .collect();
        names.sort();
        names
    }
}

static SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::build);

/// The shared, static column registry.
pub fn schema() -> &'static Schema {
    &SCHEMA
}

/// A derived field that prefers a computed column and falls back to a legacy
/// raw column when the computed value is absent (zero after coercion).
///
/// The three resolvers are declared here, next to the registry, so the
/// fallback pairs exist in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveField {
    Price,
    Change,
    Volume,
}

impl EffectiveField {
    /// The preferred, computed column.
    pub fn preferred(self) -> &'static str {
        match self {
            Self::Price => col::PX_EFF,
            Self::Change => col::CHG_EFF,
            Self::Volume => col::VOL_EFF,
        }
    }

    /// The legacy column consulted when the preferred value is absent.
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Price => col::PRICE,
            Self::Change => col::CHANGE_PCT,
            Self::Volume => col::VOLUME,
        }
    }

    /// Maps a column name to its effective resolver, if it has one.
    pub fn for_column(name: &str) -> Option<Self> {
        match name {
            col::PX_EFF => Some(Self::Price),
            col::CHG_EFF => Some(Self::Change),
            col::VOL_EFF => Some(Self::Volume),
            _ => None,
        }
    }
}
