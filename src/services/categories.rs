// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transactions and budgets point at categories by name, so a name that is
//! in use is frozen: renaming or deleting it is refused until nothing
//! references it.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Budget, Category, CategoryDraft, Transaction, TxKind};
use crate::store::RecordStore;

/// A transaction or budget whose category name matches no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanRef {
    pub kind: &'static str,
    pub id: i64,
    pub category: String,
}

fn ensure_name_free(existing: &[Category], name: &str, exclude_id: Option<i64>) -> Result<()> {
    if existing
        .iter()
        .any(|c| Some(c.id) != exclude_id && c.name == name)
    {
        return Err(Error::validation(format!("category '{}' already exists", name)));
    }
    Ok(())
}

fn reference_count<T, B>(transactions: &T, budgets: &B, name: &str) -> Result<usize>
where
    T: RecordStore<Transaction>,
    B: RecordStore<Budget>,
{
    let txs = transactions.list()?;
    let budgets = budgets.list()?;
    Ok(txs.iter().filter(|t| t.category == name).count()
        + budgets.iter().filter(|b| b.category == name).count())
}

fn ensure_unreferenced<T, B>(transactions: &T, budgets: &B, name: &str, action: &str) -> Result<()>
where
    T: RecordStore<Transaction>,
    B: RecordStore<Budget>,
{
    let refs = reference_count(transactions, budgets, name)?;
    if refs > 0 {
        tracing::warn!(category = name, refs, action, "category is referenced");
        return Err(Error::validation(format!(
            "cannot {} category '{}': {} transaction(s)/budget(s) still reference it",
            action, name, refs
        )));
    }
    Ok(())
}

pub fn create<C: RecordStore<Category>>(store: &C, draft: CategoryDraft) -> Result<Category> {
    draft.validate()?;
    ensure_name_free(&store.list()?, &draft.name, None)?;
    let cat = store.create(draft)?;
    tracing::info!(id = cat.id, name = %cat.name, "category created");
    Ok(cat)
}

/// Updates a category. A name change is only allowed while the old name is
/// unreferenced.
pub fn update<C, T, B>(
    categories: &C,
    transactions: &T,
    budgets: &B,
    id: i64,
    draft: CategoryDraft,
) -> Result<Category>
where
    C: RecordStore<Category>,
    T: RecordStore<Transaction>,
    B: RecordStore<Budget>,
{
    draft.validate()?;
    let current = categories.get(id)?;
    if current.name != draft.name {
        ensure_name_free(&categories.list()?, &draft.name, Some(id))?;
        ensure_unreferenced(transactions, budgets, &current.name, "rename")?;
    }
    categories.update(id, draft)
}

pub fn delete<C, T, B>(categories: &C, transactions: &T, budgets: &B, id: i64) -> Result<bool>
where
    C: RecordStore<Category>,
    T: RecordStore<Transaction>,
    B: RecordStore<Budget>,
{
    let current = categories.get(id)?;
    ensure_unreferenced(transactions, budgets, &current.name, "delete")?;
    let removed = categories.delete(id)?;
    tracing::info!(id, name = %current.name, "category deleted");
    Ok(removed)
}

/// Categories of the given kind; `None` keeps them all.
pub fn of_kind(categories: &[Category], kind: Option<TxKind>) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| kind.is_none_or(|k| c.kind == k))
        .cloned()
        .collect()
}

pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

/// References left dangling by data written before the rename policy, or
/// written straight to the store.
pub fn orphaned_references(
    categories: &[Category],
    transactions: &[Transaction],
    budgets: &[Budget],
) -> Vec<OrphanRef> {
    let known = |name: &str| find_by_name(categories, name).is_some();
    let tx_orphans = transactions
        .iter()
        .filter(|t| !known(&t.category))
        .map(|t| OrphanRef {
            kind: "transaction",
            id: t.id,
            category: t.category.clone(),
        });
    let budget_orphans = budgets
        .iter()
        .filter(|b| !known(&b.category))
        .map(|b| OrphanRef {
            kind: "budget",
            id: b.id,
            category: b.category.clone(),
        });
    tx_orphans.chain(budget_orphans).collect()
}
