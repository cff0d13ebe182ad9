// Balance sheet as returned by the backend's `get_balance_sheet` procedure.
//
// Node totals are taken as given: a parent's total is expected to equal the sum
// of its descendants, but that is the backend's responsibility and is never
// recomputed here.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// One account (or account group) in the balance sheet tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetNode {
    pub account_id: i64,
    pub account_code: String,
    pub account_name: String,
    pub total: Decimal,
    #[serde(default)]
    pub accounts: Vec<BalanceSheetNode>,
}

impl BalanceSheetNode {
    pub fn leaf(
        account_id: i64,
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        total: Decimal,
    ) -> Self {
        Self {
            account_id,
            account_code: account_code.into(),
            account_name: account_name.into(),
            total,
            accounts: Vec::new(),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<BalanceSheetNode>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Zero-total nodes stay in the tree but are not displayed
    pub fn is_visible(&self) -> bool {
        !self.total.is_zero()
    }

    pub fn has_children(&self) -> bool {
        !self.accounts.is_empty()
    }

    /// Placeholder for an equity bucket the backend did not return
    fn empty_bucket(bucket: EquityBucket) -> Self {
        Self::leaf(0, String::new(), bucket.label(), Decimal::ZERO)
    }
}

/// The three fixed equity components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySection {
    pub share_capital: BalanceSheetNode,
    pub reserves_and_surplus: BalanceSheetNode,
    pub current_period_profit: BalanceSheetNode,
}

impl Default for EquitySection {
    fn default() -> Self {
        Self {
            share_capital: BalanceSheetNode::empty_bucket(EquityBucket::ShareCapital),
            reserves_and_surplus: BalanceSheetNode::empty_bucket(EquityBucket::ReservesAndSurplus),
            current_period_profit: BalanceSheetNode::empty_bucket(
                EquityBucket::CurrentPeriodProfit,
            ),
        }
    }
}

impl EquitySection {
    /// Exactly the three named buckets
    pub fn total(&self) -> Decimal {
        self.share_capital.total
            + self.reserves_and_surplus.total
            + self.current_period_profit.total
    }

    /// Buckets in display order
    pub fn nodes(&self) -> [&BalanceSheetNode; 3] {
        [
            &self.share_capital,
            &self.reserves_and_surplus,
            &self.current_period_profit,
        ]
    }

    fn slot_mut(&mut self, bucket: EquityBucket) -> &mut BalanceSheetNode {
        match bucket {
            EquityBucket::ShareCapital => &mut self.share_capital,
            EquityBucket::ReservesAndSurplus => &mut self.reserves_and_surplus,
            EquityBucket::CurrentPeriodProfit => &mut self.current_period_profit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EquityBucket {
    ShareCapital,
    ReservesAndSurplus,
    CurrentPeriodProfit,
}

impl EquityBucket {
    fn label(&self) -> &'static str {
        match self {
            EquityBucket::ShareCapital => "Share Capital",
            EquityBucket::ReservesAndSurplus => "Reserves and Surplus",
            EquityBucket::CurrentPeriodProfit => "Current Period Profit",
        }
    }
}

impl FromStr for EquityBucket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "share_capital" => Ok(EquityBucket::ShareCapital),
            "reserves_and_surplus" => Ok(EquityBucket::ReservesAndSurplus),
            "current_period_profit" => Ok(EquityBucket::CurrentPeriodProfit),
            _ => Err(format!("Unknown equity bucket: {}", s)),
        }
    }
}

/// Balance sheet side an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSection {
    Asset,
    Liability,
    Equity,
}

impl fmt::Display for AccountSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountSection::Asset => write!(f, "asset"),
            AccountSection::Liability => write!(f, "liability"),
            AccountSection::Equity => write!(f, "equity"),
        }
    }
}

impl FromStr for AccountSection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "asset" => Ok(AccountSection::Asset),
            "liability" => Ok(AccountSection::Liability),
            "equity" => Ok(AccountSection::Equity),
            _ => Err(format!("Unknown account section: {}", s)),
        }
    }
}

/// Flat, parent-linked account balance row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AccountBalance {
    pub account_id: i64,
    pub parent_id: Option<i64>,
    pub section: String,
    /// Map key for top-level rows ("current_assets", "share_capital", ...)
    pub bucket: Option<String>,
    pub account_code: String,
    pub account_name: String,
    pub total: Decimal,
}

/// Balance sheet as of a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetData {
    pub as_of_date: NaiveDate,
    pub assets: BTreeMap<String, BalanceSheetNode>,
    pub liabilities: BTreeMap<String, BalanceSheetNode>,
    pub equity: EquitySection,
}

impl BalanceSheetData {
    /// Assemble the tree from flat rows.
    ///
    /// Returns `None` when there are no rows. Children keep row order. Rows
    /// pointing at a parent that is not in the result, unknown sections, unknown
    /// equity buckets and two top-level rows sharing a key are backend errors.
    pub fn assemble(as_of_date: NaiveDate, rows: Vec<AccountBalance>) -> Result<Option<Self>> {
        if rows.is_empty() {
            return Ok(None);
        }

        let mut roots = Vec::new();
        let mut children: HashMap<i64, Vec<AccountBalance>> = HashMap::new();
        for row in rows {
            match row.parent_id {
                Some(parent_id) => children.entry(parent_id).or_default().push(row),
                None => roots.push(row),
            }
        }

        let mut data = Self {
            as_of_date,
            assets: BTreeMap::new(),
            liabilities: BTreeMap::new(),
            equity: EquitySection::default(),
        };

        let mut filled_equity: Vec<EquityBucket> = Vec::with_capacity(3);
        for root in roots {
            let section = root
                .section
                .parse::<AccountSection>()
                .map_err(AppError::backend)?;
            let key = root
                .bucket
                .clone()
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| root.account_code.clone());
            let node = build_node(root, &mut children);

            match section {
                AccountSection::Asset => insert_root(&mut data.assets, section, key, node)?,
                AccountSection::Liability => {
                    insert_root(&mut data.liabilities, section, key, node)?
                }
                AccountSection::Equity => {
                    let bucket = key.parse::<EquityBucket>().map_err(AppError::backend)?;
                    if filled_equity.contains(&bucket) {
                        return Err(duplicate_bucket(section, &key));
                    }
                    filled_equity.push(bucket);
                    *data.equity.slot_mut(bucket) = node;
                }
            }
        }

        if let Some((parent_id, orphans)) = children.iter().next() {
            return Err(AppError::backend(format!(
                "Account {} references unknown parent {}",
                orphans.first().map(|o| o.account_id).unwrap_or_default(),
                parent_id
            )));
        }

        Ok(Some(data))
    }
}

fn insert_root(
    roots: &mut BTreeMap<String, BalanceSheetNode>,
    section: AccountSection,
    key: String,
    node: BalanceSheetNode,
) -> Result<()> {
    match roots.entry(key) {
        Entry::Occupied(existing) => Err(duplicate_bucket(section, existing.key())),
        Entry::Vacant(slot) => {
            slot.insert(node);
            Ok(())
        }
    }
}

fn duplicate_bucket(section: AccountSection, key: &str) -> AppError {
    AppError::backend(format!("Duplicate {} bucket '{}'", section, key))
}

fn build_node(
    row: AccountBalance,
    children: &mut HashMap<i64, Vec<AccountBalance>>,
) -> BalanceSheetNode {
    let accounts = children
        .remove(&row.account_id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| build_node(child, children))
        .collect();

    BalanceSheetNode {
        account_id: row.account_id,
        account_code: row.account_code,
        account_name: row.account_name,
        total: row.total,
        accounts,
    }
}

/// Result of checking Assets = Liabilities + Equity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_liabilities_and_equity: Decimal,
    pub is_balanced: bool,
    /// Absolute discrepancy, reported even when within tolerance
    pub difference: Decimal,
}

/// Flattened, display-ready row of the tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheetRow {
    pub depth: usize,
    pub account_id: i64,
    pub account_code: String,
    pub account_name: String,
    pub total: Decimal,
    pub has_children: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheetReport {
    pub data: BalanceSheetData,
    pub check: BalanceCheck,
}

/// What a balance sheet screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "report", rename_all = "snake_case")]
pub enum BalanceSheetState {
    Loading,
    Empty,
    Ready(BalanceSheetReport),
}

impl BalanceSheetState {
    pub fn report(&self) -> Option<&BalanceSheetReport> {
        match self {
            BalanceSheetState::Ready(report) => Some(report),
            _ => None,
        }
    }
}
