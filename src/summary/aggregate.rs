//! Per-category accumulation of converted expense amounts

use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::error::{TravelError, TravelResult};
use crate::models::{CategoryId, Expense};

use super::convert::{CurrencyConverter, HomeAmount};

/// Running totals for one category, in both currency views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub travel_total: Decimal,
    pub home_total: Decimal,
}

/// Result of aggregating every expense of a travel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Category totals in first-seen order
    pub categories: Vec<(CategoryId, CategoryTotals)>,
    pub total_home: Decimal,
    pub total_travel: Decimal,
    /// Expense currencies that had no rate, sorted
    pub unresolved_currencies: Vec<String>,
}

/// Accumulates expenses into category and grand totals
///
/// Nothing is rounded here; the grand totals always equal the sum of the
/// category totals. Once a sum overflows, later expenses are ignored and
/// [`finish`](Self::finish) reports the overflow.
pub struct CategoryAggregator<'a> {
    converter: CurrencyConverter<'a>,
    positions: HashMap<CategoryId, usize>,
    categories: Vec<(CategoryId, CategoryTotals)>,
    total_home: Decimal,
    total_travel: Decimal,
    unresolved: BTreeSet<String>,
    overflowed: bool,
}

impl<'a> CategoryAggregator<'a> {
    pub fn new(converter: CurrencyConverter<'a>) -> Self {
        Self {
            converter,
            positions: HashMap::new(),
            categories: Vec::new(),
            total_home: Decimal::ZERO,
            total_travel: Decimal::ZERO,
            unresolved: BTreeSet::new(),
            overflowed: false,
        }
    }

    /// Add one expense to the totals
    pub fn add(&mut self, expense: &Expense) {
        if self.overflowed {
            return;
        }

        let converted = self.converter.to_home(expense.amount, &expense.currency_code);
        if let HomeAmount::Unresolved(_) = converted {
            self.unresolved.insert(expense.currency_code.clone());
        }

        let Some(amount_home) = converted.value() else {
            return;
        };
        let amount_travel = self.converter.to_travel(amount_home, expense.amount);

        let sums = (
            self.total_home.checked_add(amount_home),
            self.total_travel.checked_add(amount_travel),
        );
        let (Some(total_home), Some(total_travel)) = sums else {
            self.overflowed = true;
            return;
        };
        self.total_home = total_home;
        self.total_travel = total_travel;

        // Mixed-sign amounts can overflow a category but not the grand total
        let totals = self.totals_mut(expense.category_id);
        match (
            totals.home_total.checked_add(amount_home),
            totals.travel_total.checked_add(amount_travel),
        ) {
            (Some(home), Some(travel)) => {
                totals.home_total = home;
                totals.travel_total = travel;
            }
            _ => self.overflowed = true,
        }
    }

    fn totals_mut(&mut self, category_id: CategoryId) -> &mut CategoryTotals {
        let index = match self.positions.get(&category_id) {
            Some(&index) => index,
            None => {
                self.categories.push((category_id, CategoryTotals::default()));
                let index = self.categories.len() - 1;
                self.positions.insert(category_id, index);
                index
            }
        };
        &mut self.categories[index].1
    }

    /// Fails with a validation error when a total overflowed
    pub fn finish(self) -> TravelResult<Aggregation> {
        if self.overflowed {
            return Err(TravelError::Validation(
                "Expense totals are too large to compute".into(),
            ));
        }

        Ok(Aggregation {
            categories: self.categories,
            total_home: self.total_home,
            total_travel: self.total_travel,
            unresolved_currencies: self.unresolved.into_iter().collect(),
        })
    }
}

impl<'a, 'e> Extend<&'e Expense> for CategoryAggregator<'a> {
    fn extend<I: IntoIterator<Item = &'e Expense>>(&mut self, iter: I) {
        for expense in iter {
            self.add(expense);
        }
    }
}
