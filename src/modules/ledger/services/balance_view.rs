use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use crate::core::money::BALANCE_TOLERANCE;
use crate::modules::ledger::models::{
    BalanceCheck, BalanceSheetData, BalanceSheetNode, BalanceSheetReport, BalanceSheetRow,
    BalanceSheetState, EquitySection,
};

/// Read-side view over an already fetched balance sheet.
///
/// Verifies Assets = Liabilities + Equity and flattens the account tree for
/// display. Never modifies the data it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerBalanceView;

impl LedgerBalanceView {
    pub fn new() -> Self {
        Self
    }

    /// Check the accounting identity.
    ///
    /// Equity is the sum of exactly the three fixed buckets. Zero-total nodes count
    /// toward the sums even though they are hidden from display. An imbalance is
    /// reported through `is_balanced` and `difference`, never corrected.
    pub fn verify_balance(
        &self,
        assets: &BTreeMap<String, BalanceSheetNode>,
        liabilities: &BTreeMap<String, BalanceSheetNode>,
        equity: &EquitySection,
    ) -> BalanceCheck {
        let total_assets: Decimal = assets.values().map(|n| n.total).sum();
        let total_liabilities: Decimal = liabilities.values().map(|n| n.total).sum();
        let total_equity = equity.total();
        let total_liabilities_and_equity = total_liabilities + total_equity;
        let difference = (total_assets - total_liabilities_and_equity).abs();

        BalanceCheck {
            total_assets,
            total_liabilities,
            total_equity,
            total_liabilities_and_equity,
            is_balanced: difference < BALANCE_TOLERANCE,
            difference,
        }
    }

    pub fn check(&self, data: &BalanceSheetData) -> BalanceCheck {
        self.verify_balance(&data.assets, &data.liabilities, &data.equity)
    }

    pub fn report(&self, data: BalanceSheetData) -> BalanceSheetReport {
        let check = self.check(&data);
        BalanceSheetReport { data, check }
    }

    /// Missing data is the empty state, not an error
    pub fn state(&self, data: Option<BalanceSheetData>) -> BalanceSheetState {
        match data {
            Some(data) => BalanceSheetState::Ready(self.report(data)),
            None => BalanceSheetState::Empty,
        }
    }

    /// Depth-first rows for display.
    ///
    /// Nodes with a zero total are skipped together with their subtree. Children
    /// are emitted only when their parent's account id is in `expanded`.
    pub fn visible_rows<'a>(
        &self,
        nodes: impl IntoIterator<Item = &'a BalanceSheetNode>,
        expanded: &HashSet<i64>,
    ) -> Vec<BalanceSheetRow> {
        let mut rows = Vec::new();
        for node in nodes {
            push_rows(node, 0, expanded, &mut rows);
        }
        rows
    }
}

fn push_rows(
    node: &BalanceSheetNode,
    depth: usize,
    expanded: &HashSet<i64>,
    rows: &mut Vec<BalanceSheetRow>,
) {
    if !node.is_visible() {
        return;
    }

    let is_expanded = node.has_children() && expanded.contains(&node.account_id);
    rows.push(BalanceSheetRow {
        depth,
        account_id: node.account_id,
        account_code: node.account_code.clone(),
        account_name: node.account_name.clone(),
        total: node.total,
        has_children: node.has_children(),
        expanded: is_expanded,
    });

    if is_expanded {
        for child in &node.accounts {
            push_rows(child, depth + 1, expanded, rows);
        }
    }
}
