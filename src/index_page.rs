//! The ledger page served at the root route.
//!
//! The page is rendered on the server from the current transactions, so it
//! needs no scripts or static assets.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Html,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    AppState, Error,
    html::{
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    transaction::{Transaction, TransactionStore},
};

/// The state needed to render the ledger page.
#[derive(Debug, Clone)]
pub struct IndexPageState {
    /// The store holding the transactions.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for IndexPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The balance, income and expense totals shown at the top of the page.
#[derive(Debug, Default, PartialEq)]
struct Totals {
    balance: f64,
    income: f64,
    expense: f64,
}

impl Totals {
    /// Positive amounts count as income and negative amounts as expenses.
    fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Totals::default(), |mut totals, transaction| {
                totals.balance += transaction.amount;
                if transaction.amount > 0.0 {
                    totals.income += transaction.amount;
                } else {
                    totals.expense += transaction.amount.abs();
                }
                totals
            })
    }
}

/// Render the ledger page.
pub async fn get_index_page(State(state): State<IndexPageState>) -> Result<Html<String>, Error> {
    let store = state.transaction_store.lock().map_err(|error| {
        tracing::error!("could not acquire transaction store lock: {error}");
        Error::StoreLock
    })?;

    Ok(Html(index_view(store.transactions()).into_string()))
}

fn index_view(transactions: &[Transaction]) -> Markup {
    let totals = Totals::from_transactions(transactions);

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Pocket Ledger" }

            div class="flex gap-8 mb-6"
            {
                div { "Balance: " span id="balance" class=(amount_class(totals.balance)) { (format_currency(totals.balance)) } }
                div { "Income: " span id="income" { (format_currency(totals.income)) } }
                div { "Expense: " span id="expense" { (format_currency(totals.expense)) } }
            }

            @if transactions.is_empty() {
                p id="no-transactions" { "No transactions yet." }
            } @else {
                table id="transaction-list" class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th class=(TABLE_CELL_STYLE) { "Month" }
                            th class=(TABLE_CELL_STYLE) { "Type" }
                            th class=(TABLE_CELL_STYLE) { "Description" }
                            th class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                            {
                                td class=(TABLE_CELL_STYLE) { (transaction.month) }
                                td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                                td class=(TABLE_CELL_STYLE) { (transaction.text) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    span class=(amount_class(transaction.amount)) { (format_currency(transaction.amount)) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    let styles = HeadElement::Style(PreEscaped(
        ".amount-positive { color: green; } .amount-negative { color: red; }".to_owned(),
    ));

    base("Ledger", &[styles], &content)
}

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "amount-negative"
    } else {
        "amount-positive"
    }
}
