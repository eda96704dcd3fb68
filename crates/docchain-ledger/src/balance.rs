use rust_decimal::Decimal;
use tracing::debug;

use docchain_types::ChainNode;

/// Cumulative sum of `amount` up to and including each node, in the order
/// given. Nothing is rounded.
///
/// A sum beyond the decimal range saturates at [`Decimal::MAX`] or
/// [`Decimal::MIN`] instead of failing.
pub fn running_balances(order: &[&ChainNode]) -> Vec<Decimal> {
    order
        .iter()
        .scan(Decimal::ZERO, |acc, node| {
            *acc = accumulate(*acc, node);
            Some(*acc)
        })
        .collect()
}

/// Sum of every amount in the order, saturating like [`running_balances`].
pub fn net_balance(order: &[&ChainNode]) -> Decimal {
    order.iter().fold(Decimal::ZERO, |acc, node| accumulate(acc, node))
}

fn accumulate(acc: Decimal, node: &ChainNode) -> Decimal {
    acc.checked_add(node.amount).unwrap_or_else(|| {
        debug!(node = %node.id, amount = %node.amount, "balance overflow, saturating");
        if node.amount.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}
