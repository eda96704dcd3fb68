use docchain_types::DocumentType as T;
use docchain_types::{ChainEdge, ChainGraph, ChainNode, ComputedSummary, Decimal};

use crate::Scenario;

fn aed(units: i64) -> Decimal {
    Decimal::from(units)
}

/// Amount with two decimal places, given in fils.
fn fils(fils: i64) -> Decimal {
    Decimal::new(fils, 2)
}

/// Link consecutive nodes with correction edges and attach the closing
/// balance as the computed summary.
fn lineage(nodes: Vec<ChainNode>) -> ChainGraph {
    let edges = nodes
        .windows(2)
        .map(|pair| ChainEdge::correction(pair[0].id.clone(), pair[1].id.clone()))
        .collect();
    let balance = nodes
        .iter()
        .fold(Decimal::ZERO, |acc, n| acc.saturating_add(n.amount));
    let count = nodes.len();
    let mut summary = ComputedSummary::new(balance);
    summary.node_count = Some(count);
    ChainGraph::new(nodes, edges).with_computed(summary)
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

pub(crate) fn invoice_rebill() -> ChainGraph {
    ChainGraph::new(
        vec![
            ChainNode::new(T::Invoice, "24", aed(10000))
                .with_number("INV-2026-0053")
                .with_status("issued")
                .with_date("2026-01-12"),
            ChainNode::new(T::CreditNote, "6", aed(-10000))
                .with_number("CN-2026-0001")
                .with_status("issued")
                .with_date("2026-01-15")
                .with_reason("Wrong unit price, full cancellation"),
            ChainNode::new(T::DebitNote, "1", aed(8500))
                .with_number("DN-2026-0001")
                .with_status("issued")
                .with_date("2026-01-15")
                .with_reason("Re-billed at agreed price"),
        ],
        vec![
            ChainEdge::correction("invoice:24", "credit_note:6"),
            ChainEdge::correction("credit_note:6", "debit_note:1"),
        ],
    )
    .with_computed(ComputedSummary {
        balance: aed(8500),
        vat_net: Some(fils(-7500)),
        node_count: Some(3),
    })
}

pub(crate) fn invoice() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "Price was wrong on an issued invoice",
            "The invoice is already issued and the customer agreed a different price.",
            &[
                "Open the invoice and choose Create Credit Note.",
                "Credit the full invoice amount with the reason for the correction.",
                "Issue a debit note for the corrected amount.",
            ],
            invoice_rebill(),
        ),
        Scenario::new(
            "Customer returned part of the goods",
            "Some items on an issued invoice came back.",
            &[
                "Open the invoice and choose Create Credit Note.",
                "Select only the returned lines and quantities.",
                "Issue the credit note; the invoice balance drops by the returned value.",
            ],
            lineage(vec![
                ChainNode::new(T::Invoice, "31", aed(4200))
                    .with_number("INV-2026-0061")
                    .with_status("issued")
                    .with_date("2026-02-03"),
                ChainNode::new(T::CreditNote, "9", aed(-1050))
                    .with_number("CN-2026-0004")
                    .with_status("issued")
                    .with_date("2026-02-10")
                    .with_reason("3 cartons returned damaged"),
            ]),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Credit and debit notes
// ---------------------------------------------------------------------------

pub(crate) fn credit_note() -> Vec<Scenario> {
    vec![Scenario::new(
        "Credit note issued against the wrong invoice",
        "A credit note was issued and must be offset rather than deleted.",
        &[
            "Open the credit note and choose Create Debit Note.",
            "Debit the full credit amount, referencing the mistake.",
            "Issue a new credit note against the correct invoice.",
        ],
        lineage(vec![
            ChainNode::new(T::CreditNote, "12", aed(-750))
                .with_number("CN-2026-0007")
                .with_status("issued")
                .with_date("2026-03-02"),
            ChainNode::new(T::DebitNote, "4", aed(750))
                .with_number("DN-2026-0003")
                .with_status("issued")
                .with_date("2026-03-04")
                .with_reason("Credit applied to wrong invoice"),
        ]),
    )]
}

pub(crate) fn debit_note() -> Vec<Scenario> {
    vec![Scenario::new(
        "Additional charge after invoicing",
        "Freight or a price increase was agreed after the invoice was issued.",
        &[
            "Open the invoice and choose Create Debit Note.",
            "Enter the extra charge and its reason.",
            "Issue the debit note; the invoice balance grows by the charge.",
        ],
        lineage(vec![
            ChainNode::new(T::Invoice, "40", aed(2000))
                .with_number("INV-2026-0072")
                .with_status("issued")
                .with_date("2026-03-11"),
            ChainNode::new(T::DebitNote, "7", fils(35050))
                .with_number("DN-2026-0005")
                .with_status("issued")
                .with_date("2026-03-13")
                .with_reason("Express freight agreed by phone"),
        ]),
    )]
}

// ---------------------------------------------------------------------------
// Purchasing
// ---------------------------------------------------------------------------

pub(crate) fn supplier_bill() -> Vec<Scenario> {
    vec![Scenario::new(
        "Supplier billed more than was received",
        "A posted supplier bill charges for quantities that never arrived.",
        &[
            "Check the goods receipt note for the quantities received.",
            "Record a supplier credit against the bill for the difference.",
            "Confirm the adjusted payable before scheduling payment.",
        ],
        lineage(vec![
            ChainNode::new(T::SupplierBill, "15", aed(6000))
                .with_number("BILL-2026-0015")
                .with_status("posted")
                .with_date("2026-01-22"),
            ChainNode::new(T::CreditNote, "21", aed(-600))
                .with_number("SCN-2026-0002")
                .with_status("posted")
                .with_date("2026-01-25")
                .with_reason("Short delivery of 12 units"),
        ]),
    )]
}

pub(crate) fn grn() -> Vec<Scenario> {
    vec![Scenario::new(
        "Goods received in error",
        "A confirmed goods receipt recorded stock that must go back to the supplier.",
        &[
            "Open the goods receipt note.",
            "Record a return against the received lines.",
            "Confirm the return so stock and payables are reduced.",
        ],
        ChainGraph::new(
            vec![
                ChainNode::new(T::Grn, "22", aed(3200))
                    .with_number("GRN-2026-0022")
                    .with_status("confirmed")
                    .with_date("2026-04-01"),
                ChainNode::new(T::DeliveryNote, "30", aed(-3200))
                    .with_number("RTN-2026-0003")
                    .with_status("confirmed")
                    .with_date("2026-04-02")
                    .with_reason("Wrong item shipped by supplier"),
            ],
            vec![ChainEdge::reversal("grn:22", "delivery_note:30")],
        )
        .with_computed(ComputedSummary::new(Decimal::ZERO)),
    )]
}

pub(crate) fn delivery_note() -> Vec<Scenario> {
    vec![Scenario::new(
        "Delivery quantity corrected",
        "A confirmed delivery note shipped fewer items than it records.",
        &[
            "Open the delivery note.",
            "Issue a credit note for the undelivered quantity.",
            "Re-deliver the balance on a new delivery note if required.",
        ],
        lineage(vec![
            ChainNode::new(T::DeliveryNote, "44", aed(1800))
                .with_number("DLV-2026-0044")
                .with_status("confirmed")
                .with_date("2026-04-08"),
            ChainNode::new(T::CreditNote, "27", aed(-300))
                .with_number("CN-2026-0011")
                .with_status("issued")
                .with_date("2026-04-09")
                .with_reason("2 units not loaded"),
        ]),
    )]
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

pub(crate) fn journal_entry() -> Vec<Scenario> {
    vec![Scenario::new(
        "Journal posted to the wrong account",
        "A posted journal entry hit the wrong ledger account.",
        &[
            "Open the journal entry and choose Reverse.",
            "Post the reversing journal dated on or after the original.",
            "Post a new journal entry to the correct account.",
        ],
        ChainGraph::new(
            vec![
                ChainNode::new(T::JournalEntry, "88", aed(1200))
                    .with_number("JE-2026-0088")
                    .with_status("posted")
                    .with_date("2026-02-28"),
                ChainNode::new(T::ReversingJournal, "89", aed(-1200))
                    .with_number("JE-2026-0089")
                    .with_status("posted")
                    .with_date("2026-03-01")
                    .with_reason("Posted to rent instead of utilities"),
                ChainNode::new(T::JournalEntry, "90", aed(1200))
                    .with_number("JE-2026-0090")
                    .with_status("posted")
                    .with_date("2026-03-01"),
            ],
            vec![
                ChainEdge::reversal("journal_entry:88", "reversing_journal:89"),
                ChainEdge::correction("reversing_journal:89", "journal_entry:90"),
            ],
        )
        .with_computed(ComputedSummary::new(aed(1200))),
    )]
}

pub(crate) fn payment() -> Vec<Scenario> {
    vec![Scenario::new(
        "Payment bounced",
        "A recorded customer payment was returned by the bank.",
        &[
            "Open the payment receipt and choose Reverse Payment.",
            "Record the bank's reason on the reversal.",
            "The invoice becomes outstanding again for the reversed amount.",
        ],
        ChainGraph::new(
            vec![
                ChainNode::new(T::PaymentReceipt, "57", aed(-4725))
                    .with_number("RCT-2026-0057")
                    .with_status("confirmed")
                    .with_date("2026-05-02"),
                ChainNode::new(T::PaymentReversal, "5", aed(4725))
                    .with_number("REV-2026-0005")
                    .with_status("confirmed")
                    .with_date("2026-05-06")
                    .with_reason("Cheque returned: insufficient funds"),
            ],
            vec![ChainEdge::reversal("payment_receipt:57", "payment_reversal:5")],
        )
        .with_computed(ComputedSummary::new(Decimal::ZERO)),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_links_consecutive_nodes() {
        let graph = lineage(vec![
            ChainNode::new(T::Invoice, "1", aed(100)),
            ChainNode::new(T::CreditNote, "2", aed(-40)),
            ChainNode::new(T::DebitNote, "3", aed(15)),
        ]);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[1].source, "credit_note:2");
        assert_eq!(graph.edges[1].target, "debit_note:3");
        let computed = graph.computed.unwrap();
        assert_eq!(computed.balance, aed(75));
        assert_eq!(computed.node_count, Some(3));
    }

    #[test]
    fn fils_keeps_two_places() {
        assert_eq!(fils(35050).to_string(), "350.50");
    }
}
